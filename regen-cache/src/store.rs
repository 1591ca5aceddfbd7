//! Cache storage backends.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::error::Result;

/// Key/value storage with a per-entry time-to-live.
pub trait CacheStore {
    /// Fetch a payload, or `None` when the key is absent or expired.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a payload that expires `ttl` from now.
    fn set(&self, key: &str, payload: &str, ttl: Duration) -> Result<()>;
}

impl<S: CacheStore + ?Sized> CacheStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, payload: &str, ttl: Duration) -> Result<()> {
        (**self).set(key, payload, ttl)
    }
}

struct MemoryEntry {
    payload: String,
    stored_at: Instant,
    ttl: Duration,
}

impl MemoryEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.stored_at) >= self.ttl
    }
}

/// In-process store backed by a mutex-guarded map.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, MemoryEntry>>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, MemoryEntry>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.lock();
        let expired = matches!(
            entries.get(key),
            Some(entry) if entry.is_expired(Instant::now())
        );
        if expired {
            entries.remove(key);
            return Ok(None);
        }
        Ok(entries.get(key).map(|entry| entry.payload.clone()))
    }

    fn set(&self, key: &str, payload: &str, ttl: Duration) -> Result<()> {
        self.lock().insert(
            key.to_string(),
            MemoryEntry {
                payload: payload.to_string(),
                stored_at: Instant::now(),
                ttl,
            },
        );
        Ok(())
    }
}
