use crate::domain_model::*;
use crate::domain_port::KvError;

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("user {0} does not exist")]
    UserNotFound(UserId),
    #[error("user {0} already exists")]
    UserAlreadyExists(UserId),
    #[error("users {0} and {1} are already friends")]
    AlreadyFriends(UserId, UserId),
    #[error("user {0} cannot befriend themselves")]
    SelfFriendship(UserId),
    #[error("store error: {0}")]
    Store(String),
}

impl From<KvError> for GraphError {
    fn from(err: KvError) -> Self {
        GraphError::Store(err.to_string())
    }
}

/// Users, friendships and messages kept as plain hashes and sets.
///
/// Mutators report domain failures as errors and leave the store untouched.
/// Queries about a missing user log a warning and return an empty result.
#[async_trait::async_trait]
pub trait GraphService: Send + Sync {
    async fn create_user(&self, user_id: &UserId, name: &str, login: &str)
    -> Result<(), GraphError>;

    async fn create_message(&self, user_id: &UserId, text: &str) -> Result<MessageId, GraphError>;

    async fn create_friendship(
        &self,
        user_id: &UserId,
        friend_id: &UserId,
    ) -> Result<(), GraphError>;

    async fn get_user(&self, user_id: &UserId) -> Result<Option<User>, GraphError>;

    /// Messages owned by `user_id`, in store enumeration order.
    async fn messages_for_user(
        &self,
        user_id: &UserId,
        range: DateRange,
    ) -> Result<Vec<MessageRecord>, GraphError>;

    async fn sorted_friend_names(&self, user_id: &UserId) -> Result<Vec<String>, GraphError>;

    async fn friend_count(&self, user_id: &UserId) -> Result<u64, GraphError>;

    async fn dump_all_users(&self) -> Result<Vec<UserReport>, GraphError>;
}
