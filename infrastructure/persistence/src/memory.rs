use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::time::Instant;

struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|at| at > now)
    }
}

/// Process-local string store with per-key expiry.
///
/// Offers the same atomic primitives the Redis adapters rely on, so the
/// basket engine can run without a Redis server. Clones share state.
///
/// Expired entries are dropped when their key is touched and swept from the
/// whole map on every plain write, so abandoned baskets do not pile up.
#[derive(Clone, Default)]
pub struct InMemoryKeyValueStore {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        // Every critical section leaves the map consistent, so a poisoned
        // lock is still safe to use.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn purge_expired(entries: &mut HashMap<String, Entry>, key: &str, now: Instant) {
        if entries.get(key).is_some_and(|e| !e.is_live(now)) {
            entries.remove(key);
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries();
        Self::purge_expired(&mut entries, key, Instant::now());
        entries.get(key).map(|e| e.value.clone())
    }

    pub fn set(&self, key: &str, value: String, ttl: Option<Duration>) {
        let now = Instant::now();
        let expires_at = ttl.map(|ttl| now + ttl);
        let mut entries = self.entries();
        entries.retain(|_, entry| entry.is_live(now));
        entries.insert(key.to_string(), Entry { value, expires_at });
    }

    /// Stores the value only when the key is absent or expired.
    pub fn set_if_absent(&self, key: &str, value: String, ttl: Option<Duration>) -> bool {
        let now = Instant::now();
        let mut entries = self.entries();
        Self::purge_expired(&mut entries, key, now);
        if entries.contains_key(key) {
            return false;
        }
        let expires_at = ttl.map(|ttl| now + ttl);
        entries.insert(key.to_string(), Entry { value, expires_at });
        true
    }

    pub fn delete(&self, key: &str) -> bool {
        let mut entries = self.entries();
        Self::purge_expired(&mut entries, key, Instant::now());
        entries.remove(key).is_some()
    }

    /// Deletes the key only while it holds `expected`.
    pub fn delete_if_equals(&self, key: &str, expected: &str) -> bool {
        let mut entries = self.entries();
        Self::purge_expired(&mut entries, key, Instant::now());
        if entries.get(key).is_some_and(|e| e.value == expected) {
            entries.remove(key);
            return true;
        }
        false
    }

    pub fn ttl(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        let mut entries = self.entries();
        Self::purge_expired(&mut entries, key, now);
        entries
            .get(key)
            .and_then(|e| e.expires_at)
            .map(|at| at.saturating_duration_since(now))
    }
}
