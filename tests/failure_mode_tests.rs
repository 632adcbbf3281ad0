//! Partial-failure behaviour: a lost message id is acceptable, a half
//! friendship edge is not.

use async_trait::async_trait;
use cheeper::application_impl::RealGraphService;
use cheeper::application_port::{GraphError, GraphService};
use cheeper::domain_model::{DateRange, MessageId, UserId};
use cheeper::domain_port::{KvError, KvStore, KvWrite};
use cheeper::infra_memory::MemoryKvStore;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

// ---------------------------------------------------------------------------
// Helper: a store that fails selected writes on demand
// ---------------------------------------------------------------------------

#[derive(Default)]
struct FlakyStore {
    inner: MemoryKvStore,
    fail_message_writes: AtomicBool,
    fail_batches: AtomicBool,
}

impl FlakyStore {
    fn injected(key: &str) -> KvError {
        KvError::Connection(format!("injected failure writing {key}"))
    }
}

#[async_trait]
impl KvStore for FlakyStore {
    async fn exists(&self, key: &str) -> Result<bool, KvError> {
        self.inner.exists(key).await
    }

    async fn hget(&self, key: &str, field: &str) -> Result<Option<String>, KvError> {
        self.inner.hget(key, field).await
    }

    async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>, KvError> {
        self.inner.hgetall(key).await
    }

    async fn hset_all(&self, key: &str, fields: &[(String, String)]) -> Result<(), KvError> {
        self.inner.hset_all(key, fields).await
    }

    async fn sadd(&self, key: &str, member: &str) -> Result<bool, KvError> {
        self.inner.sadd(key, member).await
    }

    async fn srem(&self, key: &str, member: &str) -> Result<bool, KvError> {
        self.inner.srem(key, member).await
    }

    async fn smembers(&self, key: &str) -> Result<Vec<String>, KvError> {
        self.inner.smembers(key).await
    }

    async fn scard(&self, key: &str) -> Result<u64, KvError> {
        self.inner.scard(key).await
    }

    async fn sismember(&self, key: &str, member: &str) -> Result<bool, KvError> {
        self.inner.sismember(key, member).await
    }

    async fn incr(&self, key: &str) -> Result<i64, KvError> {
        self.inner.incr(key).await
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>, KvError> {
        self.inner.keys(pattern).await
    }

    async fn apply(&self, batch: Vec<KvWrite>) -> Result<(), KvError> {
        if self.fail_batches.load(Ordering::SeqCst) {
            return Err(Self::injected("batch"));
        }
        let writes_message = batch
            .iter()
            .any(|w| matches!(w, KvWrite::HashSet { key, .. } if key.starts_with("message:")));
        if writes_message && self.fail_message_writes.load(Ordering::SeqCst) {
            return Err(Self::injected("message"));
        }
        self.inner.apply(batch).await
    }
}

fn uid(s: &str) -> UserId {
    s.parse().unwrap()
}

async fn setup() -> (Arc<FlakyStore>, RealGraphService) {
    let store = Arc::new(FlakyStore::default());
    let service = RealGraphService::new(store.clone());
    service.create_user(&uid("1"), "Ann", "ann1").await.unwrap();
    service.create_user(&uid("2"), "Bob", "bob2").await.unwrap();
    (store, service)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failed_message_write_leaves_a_counter_gap() {
    let (store, service) = setup().await;
    assert_eq!(service.create_message(&uid("1"), "one").await.unwrap(), MessageId(1));

    store.fail_message_writes.store(true, Ordering::SeqCst);
    let err = service.create_message(&uid("1"), "lost").await.unwrap_err();
    assert!(matches!(err, GraphError::Store(_)));
    assert!(!store.exists("message:2").await.unwrap());

    store.fail_message_writes.store(false, Ordering::SeqCst);
    assert_eq!(service.create_message(&uid("1"), "three").await.unwrap(), MessageId(3));

    let texts: Vec<String> = service
        .messages_for_user(&uid("1"), DateRange::all())
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.text)
        .collect();
    assert_eq!(texts, vec!["one", "three"]);
}

#[tokio::test]
async fn failed_friendship_leaves_no_half_edge() {
    let (store, service) = setup().await;

    store.fail_batches.store(true, Ordering::SeqCst);
    let err = service.create_friendship(&uid("1"), &uid("2")).await.unwrap_err();
    assert!(matches!(err, GraphError::Store(_)));
    assert!(!store.exists("user:1:friends").await.unwrap());
    assert!(!store.exists("user:2:friends").await.unwrap());

    store.fail_batches.store(false, Ordering::SeqCst);
    service.create_friendship(&uid("1"), &uid("2")).await.unwrap();
    assert_eq!(service.friend_count(&uid("1")).await.unwrap(), 1);
    assert_eq!(service.friend_count(&uid("2")).await.unwrap(), 1);
}

#[tokio::test]
async fn store_type_error_in_batch_is_all_or_nothing() {
    let (store, service) = setup().await;
    // corrupt Bob's friend set key so the second half of the edge cannot be written
    store
        .hset_all("user:2:friends", &[("oops".to_string(), "1".to_string())])
        .await
        .unwrap();

    let err = service.create_friendship(&uid("1"), &uid("2")).await.unwrap_err();
    assert!(matches!(err, GraphError::Store(_)));
    assert!(!store.exists("user:1:friends").await.unwrap());
}
