use std::sync::Arc;

use logger::TracingLogger;
use persistence::basket::lock::{LockStoreInMemory, LockStoreRedis};
use persistence::basket::repository::{BasketRepositoryInMemory, BasketRepositoryRedis};
use persistence::memory::InMemoryKeyValueStore;
use persistence::redis_client::{RedisConfig, create_redis_connection};

use business::application::basket::create_or_replace::CreateOrReplaceBasketUseCaseImpl;
use business::application::basket::decrease_quantity::DecreaseItemQuantityUseCaseImpl;
use business::application::basket::delete::DeleteBasketUseCaseImpl;
use business::application::basket::get::GetBasketUseCaseImpl;
use business::application::basket::increase_quantity::IncreaseItemQuantityUseCaseImpl;
use business::application::basket::remove_item::RemoveBasketItemUseCaseImpl;
use business::application::basket::upsert_items::UpsertBasketItemsUseCaseImpl;
use business::domain::basket::keys::BasketKeyspace;
use business::domain::basket::lock::{DistributedLock, LockStore};
use business::domain::basket::options::{BasketOptions, LockOptions, StoreOptions};
use business::domain::basket::repository::BasketRepository;
use business::domain::logger::Logger;

use crate::api::basket::routes::BasketApi;
use crate::config::basket_config::{BasketConfig, StoreBackend};

pub struct DependencyContainer {
    pub health_api: crate::api::health::routes::Api,
    pub basket_api: BasketApi,
}

impl DependencyContainer {
    pub async fn new(config: &BasketConfig) -> anyhow::Result<Self> {
        // Infrastructure adapters
        let (repository, locks) = match config.backend {
            StoreBackend::Redis => {
                let connection =
                    create_redis_connection(&RedisConfig::new(config.redis_url.clone()))
                        .await?;
                tracing::info!("connected to redis");
                let repository: Arc<dyn BasketRepository> =
                    Arc::new(BasketRepositoryRedis::new(connection.clone(), &config.store));
                let locks: Arc<dyn LockStore> = Arc::new(LockStoreRedis::new(connection));
                (repository, locks)
            }
            StoreBackend::Memory => {
                tracing::warn!("using the in-memory basket store; data is lost on restart");
                let store = InMemoryKeyValueStore::new();
                let repository: Arc<dyn BasketRepository> =
                    Arc::new(BasketRepositoryInMemory::new(store.clone(), &config.store));
                let locks: Arc<dyn LockStore> = Arc::new(LockStoreInMemory::new(store));
                (repository, locks)
            }
        };

        let health_api = crate::api::health::routes::Api::new(repository.clone());
        let basket_api = basket_api(
            repository,
            locks,
            &config.store,
            config.lock,
            config.options.clone(),
        );

        Ok(Self {
            health_api,
            basket_api,
        })
    }
}

/// Wires the basket use cases over the given adapters.
pub fn basket_api(
    repository: Arc<dyn BasketRepository>,
    locks: Arc<dyn LockStore>,
    store: &StoreOptions,
    lock_options: LockOptions,
    options: BasketOptions,
) -> BasketApi {
    let logger: Arc<dyn Logger> = Arc::new(TracingLogger);
    let lock = DistributedLock::new(locks, lock_options);
    let keyspace = BasketKeyspace::new(store.key_prefix.clone());

    let get_use_case = Arc::new(GetBasketUseCaseImpl {
        repository: repository.clone(),
        logger: logger.clone(),
    });
    let create_or_replace_use_case = Arc::new(CreateOrReplaceBasketUseCaseImpl {
        repository: repository.clone(),
        lock: lock.clone(),
        keyspace: keyspace.clone(),
        options: options.clone(),
        logger: logger.clone(),
    });
    let upsert_items_use_case = Arc::new(UpsertBasketItemsUseCaseImpl {
        repository: repository.clone(),
        logger: logger.clone(),
    });
    let increase_use_case = Arc::new(IncreaseItemQuantityUseCaseImpl {
        repository: repository.clone(),
        lock: lock.clone(),
        keyspace: keyspace.clone(),
        logger: logger.clone(),
    });
    let decrease_use_case = Arc::new(DecreaseItemQuantityUseCaseImpl {
        repository: repository.clone(),
        lock: lock.clone(),
        keyspace: keyspace.clone(),
        options: options.clone(),
        logger: logger.clone(),
    });
    let remove_item_use_case = Arc::new(RemoveBasketItemUseCaseImpl {
        repository: repository.clone(),
        lock,
        keyspace,
        options,
        logger: logger.clone(),
    });
    let delete_use_case = Arc::new(DeleteBasketUseCaseImpl { repository, logger });

    BasketApi::new(
        get_use_case,
        create_or_replace_use_case,
        upsert_items_use_case,
        increase_use_case,
        decrease_use_case,
        remove_item_use_case,
        delete_use_case,
    )
}
