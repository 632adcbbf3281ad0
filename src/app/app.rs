use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_port::*;
use crate::infra_memory::*;
use crate::infra_redis::*;
use crate::logger::*;
use crate::settings::{Backend, Settings};
use std::sync::Arc;
use std::time::Duration;

pub struct App {
    pub graph_service: Arc<dyn GraphService>,
}

impl App {
    /// Connects the configured store. An unreachable store is fatal.
    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let store: Arc<dyn KvStore> = match settings.store.backend {
            Backend::Redis => {
                let timeout = Duration::from_secs(settings.redis.connect_timeout_secs);
                let store = RedisKvStore::connect(&settings.redis.url, timeout).await?;
                info!(url = %settings.redis.url, "connected to redis");
                Arc::new(store)
            }
            Backend::Memory => {
                warn!("using the in-memory store, nothing survives this process");
                Arc::new(MemoryKvStore::new())
            }
        };

        Ok(Self::with_store(store))
    }

    pub fn with_store(store: Arc<dyn KvStore>) -> Self {
        Self {
            graph_service: Arc::new(RealGraphService::new(store)),
        }
    }
}
