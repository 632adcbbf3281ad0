use super::KeyPattern;
use crate::domain_port::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone)]
enum Entry {
    Int(i64),
    Hash(BTreeMap<String, String>),
    Set(BTreeSet<String>),
}

type Keyspace = BTreeMap<String, Entry>;

/// Keys enumerate in lexicographic order.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    keyspace: Mutex<Keyspace>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Keyspace>, KvError> {
        self.keyspace
            .lock()
            .map_err(|_| KvError::Store("memory store lock poisoned".to_string()))
    }
}

fn hash<'a>(ks: &'a Keyspace, key: &str) -> Result<Option<&'a BTreeMap<String, String>>, KvError> {
    match ks.get(key) {
        None => Ok(None),
        Some(Entry::Hash(h)) => Ok(Some(h)),
        Some(_) => Err(KvError::WrongType(key.to_string())),
    }
}

fn set<'a>(ks: &'a Keyspace, key: &str) -> Result<Option<&'a BTreeSet<String>>, KvError> {
    match ks.get(key) {
        None => Ok(None),
        Some(Entry::Set(s)) => Ok(Some(s)),
        Some(_) => Err(KvError::WrongType(key.to_string())),
    }
}

fn hash_set(ks: &mut Keyspace, key: &str, fields: &[(String, String)]) -> Result<(), KvError> {
    if fields.is_empty() {
        return Ok(());
    }
    let entry = ks
        .entry(key.to_string())
        .or_insert_with(|| Entry::Hash(BTreeMap::new()));
    match entry {
        Entry::Hash(h) => {
            for (f, v) in fields {
                h.insert(f.clone(), v.clone());
            }
            Ok(())
        }
        _ => Err(KvError::WrongType(key.to_string())),
    }
}

fn set_add(ks: &mut Keyspace, key: &str, member: &str) -> Result<bool, KvError> {
    let entry = ks
        .entry(key.to_string())
        .or_insert_with(|| Entry::Set(BTreeSet::new()));
    match entry {
        Entry::Set(s) => Ok(s.insert(member.to_string())),
        _ => Err(KvError::WrongType(key.to_string())),
    }
}

fn set_remove(ks: &mut Keyspace, key: &str, member: &str) -> Result<bool, KvError> {
    let (removed, now_empty) = match ks.get_mut(key) {
        None => return Ok(false),
        Some(Entry::Set(s)) => (s.remove(member), s.is_empty()),
        Some(_) => return Err(KvError::WrongType(key.to_string())),
    };
    // an emptied set stops existing
    if now_empty {
        ks.remove(key);
    }
    Ok(removed)
}

fn apply_write(ks: &mut Keyspace, write: &KvWrite) -> Result<(), KvError> {
    match write {
        KvWrite::HashSet { key, fields } => hash_set(ks, key, fields),
        KvWrite::SetAdd { key, member } => set_add(ks, key, member).map(|_| ()),
    }
}

#[async_trait::async_trait]
impl KvStore for MemoryKvStore {
    async fn exists(&self, key: &str) -> Result<bool, KvError> {
        Ok(self.lock()?.contains_key(key))
    }

    async fn hget(&self, key: &str, field: &str) -> Result<Option<String>, KvError> {
        let ks = self.lock()?;
        Ok(hash(&ks, key)?.and_then(|h| h.get(field).cloned()))
    }

    async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>, KvError> {
        let ks = self.lock()?;
        Ok(hash(&ks, key)?
            .map(|h| h.iter().map(|(f, v)| (f.clone(), v.clone())).collect())
            .unwrap_or_default())
    }

    async fn hset_all(&self, key: &str, fields: &[(String, String)]) -> Result<(), KvError> {
        hash_set(&mut *self.lock()?, key, fields)
    }

    async fn sadd(&self, key: &str, member: &str) -> Result<bool, KvError> {
        set_add(&mut *self.lock()?, key, member)
    }

    async fn srem(&self, key: &str, member: &str) -> Result<bool, KvError> {
        set_remove(&mut *self.lock()?, key, member)
    }

    async fn smembers(&self, key: &str) -> Result<Vec<String>, KvError> {
        let ks = self.lock()?;
        Ok(set(&ks, key)?
            .map(|s| s.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn scard(&self, key: &str) -> Result<u64, KvError> {
        let ks = self.lock()?;
        Ok(set(&ks, key)?.map_or(0, |s| s.len() as u64))
    }

    async fn sismember(&self, key: &str, member: &str) -> Result<bool, KvError> {
        let ks = self.lock()?;
        Ok(set(&ks, key)?.is_some_and(|s| s.contains(member)))
    }

    async fn incr(&self, key: &str) -> Result<i64, KvError> {
        let mut ks = self.lock()?;
        let entry = ks.entry(key.to_string()).or_insert(Entry::Int(0));
        match entry {
            Entry::Int(n) => {
                *n = n
                    .checked_add(1)
                    .ok_or_else(|| KvError::NotAnInteger(key.to_string()))?;
                Ok(*n)
            }
            _ => Err(KvError::WrongType(key.to_string())),
        }
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>, KvError> {
        let pattern = KeyPattern::new(pattern)
            .map_err(|e| KvError::Store(format!("invalid key pattern {pattern:?}: {e}")))?;
        let ks = self.lock()?;
        Ok(ks
            .keys()
            .filter(|k| pattern.is_match(k))
            .cloned()
            .collect())
    }

    async fn apply(&self, batch: Vec<KvWrite>) -> Result<(), KvError> {
        let mut ks = self.lock()?;
        let mut staged = ks.clone();
        for write in &batch {
            apply_write(&mut staged, write)?;
        }
        *ks = staged;
        Ok(())
    }
}
