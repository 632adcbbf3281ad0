use crate::application_port::{GraphError, GraphService};
use crate::domain_model::*;
use crate::domain_port::{KvError, KvStore, KvWrite};
use crate::logger::*;
use chrono::Local;
use std::collections::HashMap;
use std::sync::Arc;

pub struct RealGraphService {
    store: Arc<dyn KvStore>,
}

impl RealGraphService {
    pub fn new(store: Arc<dyn KvStore>) -> RealGraphService {
        RealGraphService { store }
    }

    async fn verify_user(&self, user_id: &UserId) -> Result<Option<VerifiedUser>, GraphError> {
        if self.store.exists(&user_key(user_id.as_str())).await? {
            Ok(Some(VerifiedUser::new(user_id.clone())))
        } else {
            Ok(None)
        }
    }

    async fn require_user(&self, user_id: &UserId) -> Result<VerifiedUser, GraphError> {
        self.verify_user(user_id).await?.ok_or_else(|| {
            warn!(%user_id, "user does not exist");
            GraphError::UserNotFound(user_id.clone())
        })
    }

    /// Reads every message record. Keys of the wrong type are skipped, since
    /// anything may live under `message:*`.
    async fn scan_messages(&self) -> Result<Vec<MessageRecord>, GraphError> {
        let keys = self.store.keys(MESSAGE_PATTERN).await?;
        let mut records = Vec::with_capacity(keys.len());

        for key in keys.iter().filter(|k| is_message_record_key(k)) {
            let Some(fields) = skip_wrong_type(self.store.hgetall(key).await)? else {
                continue;
            };
            match MessageRecord::from_fields(key, fields) {
                Some(record) => records.push(record),
                None => debug!(key = %key, "message without owner skipped"),
            }
        }

        Ok(records)
    }
}

fn skip_wrong_type<T>(result: Result<T, KvError>) -> Result<Option<T>, GraphError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(KvError::WrongType(key)) => {
            warn!(key = %key, "unexpected value type, skipped");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

#[async_trait::async_trait]
impl GraphService for RealGraphService {
    async fn create_user(
        &self,
        user_id: &UserId,
        name: &str,
        login: &str,
    ) -> Result<(), GraphError> {
        let key = user_key(user_id.as_str());
        if self.store.exists(&key).await? {
            warn!(%user_id, "user already exists");
            return Err(GraphError::UserAlreadyExists(user_id.clone()));
        }

        // No friend set is written: an empty set is an absent key.
        let fields = vec![
            (field::NAME.to_string(), name.to_string()),
            (field::LOGIN.to_string(), login.to_string()),
        ];
        self.store.hset_all(&key, &fields).await?;

        info!(%user_id, name, "user created");
        Ok(())
    }

    async fn create_message(&self, user_id: &UserId, text: &str) -> Result<MessageId, GraphError> {
        let owner = self.require_user(user_id).await?;

        let next = self.store.incr(MESSAGE_NEXT_ID).await?;
        let message_id = u64::try_from(next)
            .ok()
            .filter(|id| *id > 0)
            .map(MessageId)
            .ok_or_else(|| {
                GraphError::Store(format!("{MESSAGE_NEXT_ID} produced invalid id {next}"))
            })?;

        let message = NewMessage {
            user_id: owner.id(),
            text,
            created_at: Local::now().naive_local(),
        };
        // A failure here burns the id; gaps in the sequence are expected.
        self.store
            .apply(vec![KvWrite::HashSet {
                key: message_key(message_id),
                fields: message.fields(),
            }])
            .await
            .map_err(|e| {
                warn!(%message_id, error = %e, "message id issued without a record");
                GraphError::from(e)
            })?;

        info!(%user_id, %message_id, "message created");
        Ok(message_id)
    }

    async fn create_friendship(
        &self,
        user_id: &UserId,
        friend_id: &UserId,
    ) -> Result<(), GraphError> {
        if user_id == friend_id {
            return Err(GraphError::SelfFriendship(user_id.clone()));
        }
        let user = self.require_user(user_id).await?;
        let friend = self.require_user(friend_id).await?;

        let user_friends = friends_key(user.id().as_str());
        let friend_friends = friends_key(friend.id().as_str());

        if self
            .store
            .sismember(&user_friends, friend.id().as_str())
            .await?
        {
            warn!(%user_id, %friend_id, "already friends");
            return Err(GraphError::AlreadyFriends(user_id.clone(), friend_id.clone()));
        }

        // Both directions in one batch so a failure cannot leave a half edge.
        // An existing reverse entry is simply re-added.
        self.store
            .apply(vec![
                KvWrite::SetAdd {
                    key: user_friends,
                    member: friend.id().to_string(),
                },
                KvWrite::SetAdd {
                    key: friend_friends,
                    member: user.id().to_string(),
                },
            ])
            .await?;

        info!(%user_id, %friend_id, "friendship created");
        Ok(())
    }

    async fn get_user(&self, user_id: &UserId) -> Result<Option<User>, GraphError> {
        let Some(user) = self.verify_user(user_id).await? else {
            return Ok(None);
        };
        let mut fields = skip_wrong_type(self.store.hgetall(&user_key(user_id.as_str())).await)?
            .unwrap_or_default();

        Ok(Some(User {
            user_id: user.id().clone(),
            name: fields.remove(field::NAME),
            login: fields.remove(field::LOGIN),
        }))
    }

    async fn messages_for_user(
        &self,
        user_id: &UserId,
        range: DateRange,
    ) -> Result<Vec<MessageRecord>, GraphError> {
        let Some(owner) = self.verify_user(user_id).await? else {
            warn!(%user_id, "user does not exist");
            return Ok(Vec::new());
        };

        let messages: Vec<MessageRecord> = self
            .scan_messages()
            .await?
            .into_iter()
            .filter(|m| m.user_id == owner.id().as_str())
            .filter(|m| m.in_range(&range))
            .collect();

        debug!(%user_id, ?range, found = messages.len(), "messages listed");
        Ok(messages)
    }

    async fn sorted_friend_names(&self, user_id: &UserId) -> Result<Vec<String>, GraphError> {
        let Some(user) = self.verify_user(user_id).await? else {
            warn!(%user_id, "user does not exist");
            return Ok(Vec::new());
        };

        let friend_ids = self
            .store
            .smembers(&friends_key(user.id().as_str()))
            .await?;

        let mut names = Vec::with_capacity(friend_ids.len());
        for friend_id in &friend_ids {
            let name = skip_wrong_type(
                self.store
                    .hget(&user_key(friend_id), field::NAME)
                    .await,
            )?
            .flatten()
            .filter(|name| !name.is_empty());
            match name {
                Some(name) => names.push(name),
                None => debug!(%user_id, friend_id = %friend_id, "friend without a name skipped"),
            }
        }

        names.sort();
        Ok(names)
    }

    async fn friend_count(&self, user_id: &UserId) -> Result<u64, GraphError> {
        let Some(user) = self.verify_user(user_id).await? else {
            warn!(%user_id, "user does not exist");
            return Ok(0);
        };
        Ok(self.store.scard(&friends_key(user.id().as_str())).await?)
    }

    async fn dump_all_users(&self) -> Result<Vec<UserReport>, GraphError> {
        let mut user_ids: Vec<String> = self
            .store
            .keys(USER_PATTERN)
            .await?
            .iter()
            .filter_map(|key| user_id_from_key(key))
            .map(str::to_string)
            .collect();
        sort_ids(&mut user_ids);
        user_ids.dedup();

        let mut messages_by_owner: HashMap<String, Vec<MessageRecord>> = HashMap::new();
        for message in self.scan_messages().await? {
            messages_by_owner
                .entry(message.user_id.clone())
                .or_default()
                .push(message);
        }

        let mut reports = Vec::with_capacity(user_ids.len());
        for user_id in user_ids {
            let mut fields = skip_wrong_type(self.store.hgetall(&user_key(&user_id)).await)?
                .unwrap_or_default();
            let mut friends = skip_wrong_type(self.store.smembers(&friends_key(&user_id)).await)?
                .unwrap_or_default();
            sort_ids(&mut friends);

            reports.push(UserReport {
                name: fields.remove(field::NAME),
                login: fields.remove(field::LOGIN),
                friends,
                messages: messages_by_owner.remove(&user_id).unwrap_or_default(),
                user_id,
            });
        }

        Ok(reports)
    }
}
