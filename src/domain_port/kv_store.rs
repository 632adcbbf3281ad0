use std::collections::HashMap;

#[derive(Debug, thiserror::Error)]
pub enum KvError {
    #[error("connection failure: {0}")]
    Connection(String),
    #[error("wrong value type at key {0:?}")]
    WrongType(String),
    #[error("value at key {0:?} is not an integer")]
    NotAnInteger(String),
    #[error("infra error: {0}")]
    Store(String),
}

/// A single write inside an atomic [`KvStore::apply`] batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KvWrite {
    HashSet {
        key: String,
        fields: Vec<(String, String)>,
    },
    SetAdd {
        key: String,
        member: String,
    },
}

/// The subset of a Redis-like store this crate relies on. Sets that become
/// empty disappear, like in Redis.
#[async_trait::async_trait]
pub trait KvStore: Send + Sync {
    async fn exists(&self, key: &str) -> Result<bool, KvError>;

    async fn hget(&self, key: &str, field: &str) -> Result<Option<String>, KvError>;

    /// Missing keys yield an empty map.
    async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>, KvError>;

    async fn hset_all(&self, key: &str, fields: &[(String, String)]) -> Result<(), KvError>;

    /// Returns whether the member was newly added.
    async fn sadd(&self, key: &str, member: &str) -> Result<bool, KvError>;

    /// Returns whether the member was present.
    async fn srem(&self, key: &str, member: &str) -> Result<bool, KvError>;

    async fn smembers(&self, key: &str) -> Result<Vec<String>, KvError>;

    async fn scard(&self, key: &str) -> Result<u64, KvError>;

    async fn sismember(&self, key: &str, member: &str) -> Result<bool, KvError>;

    /// Increments the integer at `key` by one, starting from zero, and returns the new value.
    async fn incr(&self, key: &str) -> Result<i64, KvError>;

    /// All keys matching a Redis glob pattern, in store enumeration order.
    async fn keys(&self, pattern: &str) -> Result<Vec<String>, KvError>;

    /// Applies every write or none of them.
    async fn apply(&self, batch: Vec<KvWrite>) -> Result<(), KvError>;
}
