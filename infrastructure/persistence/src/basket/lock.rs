use std::time::Duration;

use async_trait::async_trait;
use redis::Script;
use redis::aio::ConnectionManager;

use business::domain::basket::lock::LockStore;
use business::domain::errors::RepositoryError;

use crate::memory::InMemoryKeyValueStore;
use crate::redis_client::unavailable;

const RELEASE_SCRIPT: &str = r#"
if redis.call('GET', KEYS[1]) == ARGV[1] then
    return redis.call('DEL', KEYS[1])
else
    return 0
end
"#;

/// Lock primitives on Redis: `SET NX PX` to take, compare-and-delete script to release.
pub struct LockStoreRedis {
    connection: ConnectionManager,
    release_script: Script,
}

impl LockStoreRedis {
    pub fn new(connection: ConnectionManager) -> Self {
        Self {
            connection,
            release_script: Script::new(RELEASE_SCRIPT),
        }
    }
}

#[async_trait]
impl LockStore for LockStoreRedis {
    async fn try_acquire(
        &self,
        key: &str,
        token: &str,
        hold: Duration,
    ) -> Result<bool, RepositoryError> {
        let mut connection = self.connection.clone();
        let reply: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(token)
            .arg("NX")
            .arg("PX")
            .arg(hold.as_millis() as u64)
            .query_async(&mut connection)
            .await
            .map_err(unavailable)?;

        Ok(reply.is_some())
    }

    async fn release(&self, key: &str, token: &str) -> Result<bool, RepositoryError> {
        let mut connection = self.connection.clone();
        let removed: i64 = self
            .release_script
            .key(key)
            .arg(token)
            .invoke_async(&mut connection)
            .await
            .map_err(unavailable)?;

        Ok(removed > 0)
    }
}

#[derive(Clone, Default)]
pub struct LockStoreInMemory {
    store: InMemoryKeyValueStore,
}

impl LockStoreInMemory {
    pub fn new(store: InMemoryKeyValueStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl LockStore for LockStoreInMemory {
    async fn try_acquire(
        &self,
        key: &str,
        token: &str,
        hold: Duration,
    ) -> Result<bool, RepositoryError> {
        Ok(self.store.set_if_absent(key, token.to_string(), Some(hold)))
    }

    async fn release(&self, key: &str, token: &str) -> Result<bool, RepositoryError> {
        Ok(self.store.delete_if_equals(key, token))
    }
}
