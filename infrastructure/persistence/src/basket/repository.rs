use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;

use business::domain::basket::keys::BasketKeyspace;
use business::domain::basket::model::Basket;
use business::domain::basket::options::StoreOptions;
use business::domain::basket::repository::BasketRepository;
use business::domain::errors::RepositoryError;
use business::domain::shared::value_objects::CustomerId;

use super::entity::{decode, encode};
use crate::memory::InMemoryKeyValueStore;
use crate::redis_client::unavailable;

/// Stores each basket as one JSON string under `{prefix}:{customerId}`.
pub struct BasketRepositoryRedis {
    connection: ConnectionManager,
    keyspace: BasketKeyspace,
    ttl: Duration,
}

impl BasketRepositoryRedis {
    pub fn new(connection: ConnectionManager, options: &StoreOptions) -> Self {
        Self {
            connection,
            keyspace: BasketKeyspace::new(options.key_prefix.clone()),
            ttl: options.record_ttl,
        }
    }
}

#[async_trait]
impl BasketRepository for BasketRepositoryRedis {
    async fn get(&self, customer_id: &CustomerId) -> Result<Option<Basket>, RepositoryError> {
        let mut connection = self.connection.clone();
        let raw: Option<String> = redis::cmd("GET")
            .arg(self.keyspace.record_key(customer_id))
            .query_async(&mut connection)
            .await
            .map_err(unavailable)?;

        match raw {
            Some(raw) if !raw.is_empty() => decode(&raw).map(Some),
            _ => Ok(None),
        }
    }

    async fn save(&self, basket: &Basket) -> Result<(), RepositoryError> {
        let payload = encode(basket)?;
        let mut connection = self.connection.clone();
        let _: () = redis::cmd("SET")
            .arg(self.keyspace.record_key(basket.customer_id()))
            .arg(payload)
            .arg("EX")
            .arg(self.ttl.as_secs())
            .query_async(&mut connection)
            .await
            .map_err(unavailable)?;

        Ok(())
    }

    async fn delete(&self, customer_id: &CustomerId) -> Result<bool, RepositoryError> {
        let mut connection = self.connection.clone();
        let removed: i64 = redis::cmd("DEL")
            .arg(self.keyspace.record_key(customer_id))
            .query_async(&mut connection)
            .await
            .map_err(unavailable)?;

        Ok(removed > 0)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        let mut connection = self.connection.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut connection)
            .await
            .map_err(unavailable)?;

        Ok(())
    }
}

/// Same record layout as [`BasketRepositoryRedis`], kept in process memory.
#[derive(Clone)]
pub struct BasketRepositoryInMemory {
    store: InMemoryKeyValueStore,
    keyspace: BasketKeyspace,
    ttl: Duration,
}

impl BasketRepositoryInMemory {
    pub fn new(store: InMemoryKeyValueStore, options: &StoreOptions) -> Self {
        Self {
            store,
            keyspace: BasketKeyspace::new(options.key_prefix.clone()),
            ttl: options.record_ttl,
        }
    }
}

#[async_trait]
impl BasketRepository for BasketRepositoryInMemory {
    async fn get(&self, customer_id: &CustomerId) -> Result<Option<Basket>, RepositoryError> {
        self.store
            .get(&self.keyspace.record_key(customer_id))
            .map(|raw| decode(&raw))
            .transpose()
    }

    async fn save(&self, basket: &Basket) -> Result<(), RepositoryError> {
        let payload = encode(basket)?;
        self.store.set(
            &self.keyspace.record_key(basket.customer_id()),
            payload,
            Some(self.ttl),
        );
        Ok(())
    }

    async fn delete(&self, customer_id: &CustomerId) -> Result<bool, RepositoryError> {
        Ok(self.store.delete(&self.keyspace.record_key(customer_id)))
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
