use crate::domain_port::*;
use crate::logger::*;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, RedisError};
use std::collections::{HashMap, HashSet};
use std::time::Duration;

const SCAN_COUNT: usize = 500;

pub struct RedisKvStore {
    conn: ConnectionManager,
}

impl RedisKvStore {
    pub fn new(conn: ConnectionManager) -> Self {
        RedisKvStore { conn }
    }

    /// Opens a managed connection and pings it. The first connection is
    /// attempted once, bounded by `connect_timeout`.
    pub async fn connect(url: &str, connect_timeout: Duration) -> Result<Self, KvError> {
        let client =
            redis::Client::open(url).map_err(|e| KvError::Connection(format!("{url}: {e}")))?;
        let config = ConnectionManagerConfig::new()
            .set_number_of_retries(0)
            .set_connection_timeout(connect_timeout);
        let mut conn = client
            .get_connection_manager_with_config(config)
            .await
            .map_err(|e| KvError::Connection(format!("{url}: {e}")))?;

        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| KvError::Connection(format!("{url}: {e}")))?;
        debug!("PING -> {}", pong);

        Ok(Self::new(conn))
    }
}

fn store_err(key: &str, e: RedisError) -> KvError {
    if e.code() == Some("WRONGTYPE") {
        KvError::WrongType(key.to_string())
    } else if e.is_io_error() || e.is_connection_dropped() {
        KvError::Connection(e.to_string())
    } else {
        KvError::Store(e.to_string())
    }
}

#[async_trait::async_trait]
impl KvStore for RedisKvStore {
    async fn exists(&self, key: &str) -> Result<bool, KvError> {
        let mut conn = self.conn.clone();
        conn.exists(key).await.map_err(|e| store_err(key, e))
    }

    async fn hget(&self, key: &str, field: &str) -> Result<Option<String>, KvError> {
        let mut conn = self.conn.clone();
        conn.hget(key, field).await.map_err(|e| store_err(key, e))
    }

    async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>, KvError> {
        let mut conn = self.conn.clone();
        conn.hgetall(key).await.map_err(|e| store_err(key, e))
    }

    async fn hset_all(&self, key: &str, fields: &[(String, String)]) -> Result<(), KvError> {
        // HSET without field pairs is a syntax error
        if fields.is_empty() {
            return Ok(());
        }
        let mut conn = self.conn.clone();
        let _: () = conn
            .hset_multiple(key, fields)
            .await
            .map_err(|e| store_err(key, e))?;
        Ok(())
    }

    async fn sadd(&self, key: &str, member: &str) -> Result<bool, KvError> {
        let mut conn = self.conn.clone();
        let added: i64 = conn.sadd(key, member).await.map_err(|e| store_err(key, e))?;
        Ok(added > 0)
    }

    async fn srem(&self, key: &str, member: &str) -> Result<bool, KvError> {
        let mut conn = self.conn.clone();
        let removed: i64 = conn.srem(key, member).await.map_err(|e| store_err(key, e))?;
        Ok(removed > 0)
    }

    async fn smembers(&self, key: &str) -> Result<Vec<String>, KvError> {
        let mut conn = self.conn.clone();
        conn.smembers(key).await.map_err(|e| store_err(key, e))
    }

    async fn scard(&self, key: &str) -> Result<u64, KvError> {
        let mut conn = self.conn.clone();
        conn.scard(key).await.map_err(|e| store_err(key, e))
    }

    async fn sismember(&self, key: &str, member: &str) -> Result<bool, KvError> {
        let mut conn = self.conn.clone();
        conn.sismember(key, member)
            .await
            .map_err(|e| store_err(key, e))
    }

    async fn incr(&self, key: &str) -> Result<i64, KvError> {
        let mut conn = self.conn.clone();
        conn.incr(key, 1).await.map_err(|e| match store_err(key, e) {
            KvError::Store(msg) if msg.contains("not an integer") => {
                KvError::NotAnInteger(key.to_string())
            }
            other => other,
        })
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>, KvError> {
        let mut conn = self.conn.clone();
        let mut seen = HashSet::new();
        let mut keys = Vec::new();
        let mut cursor: u64 = 0;

        // SCAN may return a key more than once
        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_COUNT)
                .query_async(&mut conn)
                .await
                .map_err(|e| store_err(pattern, e))?;
            for key in batch {
                if seen.insert(key.clone()) {
                    keys.push(key);
                }
            }
            if next == 0 {
                break;
            }
            cursor = next;
        }

        trace!(pattern, found = keys.len(), "scanned keys");
        Ok(keys)
    }

    async fn apply(&self, batch: Vec<KvWrite>) -> Result<(), KvError> {
        if batch.is_empty() {
            return Ok(());
        }

        let mut pipe = redis::pipe();
        pipe.atomic();
        for write in &batch {
            match write {
                KvWrite::HashSet { key, fields } if !fields.is_empty() => {
                    pipe.hset_multiple(key, fields.as_slice()).ignore();
                }
                KvWrite::HashSet { .. } => {}
                KvWrite::SetAdd { key, member } => {
                    pipe.sadd(key, member).ignore();
                }
            }
        }

        let mut conn = self.conn.clone();
        let _: () = pipe
            .query_async(&mut conn)
            .await
            .map_err(|e| store_err("MULTI", e))?;
        Ok(())
    }
}
