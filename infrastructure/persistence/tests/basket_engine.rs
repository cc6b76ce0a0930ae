use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use bigdecimal::BigDecimal;
use business::application::basket::create_or_replace::CreateOrReplaceBasketUseCaseImpl;
use business::application::basket::decrease_quantity::DecreaseItemQuantityUseCaseImpl;
use business::application::basket::get::GetBasketUseCaseImpl;
use business::application::basket::increase_quantity::IncreaseItemQuantityUseCaseImpl;
use business::application::basket::remove_item::RemoveBasketItemUseCaseImpl;
use business::application::basket::upsert_items::UpsertBasketItemsUseCaseImpl;
use business::domain::basket::errors::BasketError;
use business::domain::basket::keys::BasketKeyspace;
use business::domain::basket::lock::DistributedLock;
use business::domain::basket::model::{BasketLineItem, BasketUpdate};
use business::domain::basket::options::{
    BasketOptions, CreateOrReplaceMode, LockOptions, StoreOptions,
};
use business::domain::basket::repository::BasketRepository;
use business::domain::basket::use_cases::create_or_replace::{
    CreateOrReplaceBasketParams, CreateOrReplaceBasketUseCase,
};
use business::domain::basket::use_cases::decrease_quantity::{
    DecreaseItemQuantityParams, DecreaseItemQuantityUseCase,
};
use business::domain::basket::use_cases::get::{GetBasketParams, GetBasketUseCase};
use business::domain::basket::use_cases::increase_quantity::{
    IncreaseItemQuantityParams, IncreaseItemQuantityUseCase,
};
use business::domain::basket::use_cases::remove_item::{
    RemoveBasketItemParams, RemoveBasketItemUseCase,
};
use business::domain::basket::use_cases::upsert_items::{
    UpsertBasketItemsParams, UpsertBasketItemsUseCase,
};
use business::domain::logger::Logger;
use business::domain::shared::value_objects::CustomerId;
use logger::TracingLogger;
use persistence::basket::lock::LockStoreInMemory;
use persistence::basket::repository::BasketRepositoryInMemory;
use persistence::memory::InMemoryKeyValueStore;

struct Engine {
    store: InMemoryKeyValueStore,
    get: GetBasketUseCaseImpl,
    create_or_replace: CreateOrReplaceBasketUseCaseImpl,
    upsert: UpsertBasketItemsUseCaseImpl,
    increase: IncreaseItemQuantityUseCaseImpl,
    decrease: DecreaseItemQuantityUseCaseImpl,
    remove: RemoveBasketItemUseCaseImpl,
}

impl Engine {
    fn new(options: BasketOptions, lock_options: LockOptions) -> Self {
        let store = InMemoryKeyValueStore::new();
        let store_options = StoreOptions::default();
        let repository: Arc<dyn BasketRepository> =
            Arc::new(BasketRepositoryInMemory::new(store.clone(), &store_options));
        let lock = DistributedLock::new(
            Arc::new(LockStoreInMemory::new(store.clone())),
            lock_options,
        );
        let keyspace = BasketKeyspace::new(store_options.key_prefix.clone());
        let logger: Arc<dyn Logger> = Arc::new(TracingLogger);

        Self {
            store,
            get: GetBasketUseCaseImpl {
                repository: repository.clone(),
                logger: logger.clone(),
            },
            create_or_replace: CreateOrReplaceBasketUseCaseImpl {
                repository: repository.clone(),
                lock: lock.clone(),
                keyspace: keyspace.clone(),
                options: options.clone(),
                logger: logger.clone(),
            },
            upsert: UpsertBasketItemsUseCaseImpl {
                repository: repository.clone(),
                logger: logger.clone(),
            },
            increase: IncreaseItemQuantityUseCaseImpl {
                repository: repository.clone(),
                lock: lock.clone(),
                keyspace: keyspace.clone(),
                logger: logger.clone(),
            },
            decrease: DecreaseItemQuantityUseCaseImpl {
                repository: repository.clone(),
                lock: lock.clone(),
                keyspace: keyspace.clone(),
                options: options.clone(),
                logger: logger.clone(),
            },
            remove: RemoveBasketItemUseCaseImpl {
                repository,
                lock,
                keyspace,
                options,
                logger,
            },
        }
    }

    fn with_defaults() -> Self {
        Self::new(BasketOptions::default(), LockOptions::default())
    }
}

fn customer() -> CustomerId {
    CustomerId::parse("customer-1").unwrap()
}

fn item(product_id: &str, price: &str, quantity: i32) -> BasketLineItem {
    BasketLineItem::new(product_id, "Widget", BigDecimal::from_str(price).unwrap(), quantity)
        .unwrap()
}

fn amount(value: &str) -> BigDecimal {
    BigDecimal::from_str(value).unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_increases_are_all_applied() {
    let engine = Arc::new(Engine::new(
        BasketOptions::default(),
        LockOptions::new(
            Duration::from_secs(5),
            Duration::from_millis(1),
            Duration::from_secs(10),
        ),
    ));
    engine
        .upsert
        .execute(UpsertBasketItemsParams {
            customer_id: customer(),
            items: vec![item("p1", "1.00", 3)],
        })
        .await
        .unwrap();

    let tasks: Vec<_> = (0..20)
        .map(|_| {
            let engine = engine.clone();
            tokio::spawn(async move {
                engine
                    .increase
                    .execute(IncreaseItemQuantityParams {
                        customer_id: customer(),
                        product_id: "p1".to_string(),
                        quantity: 1,
                    })
                    .await
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let basket = engine
        .get
        .execute(GetBasketParams {
            customer_id: customer(),
        })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(basket.find_item("p1").unwrap().quantity, 23);
}

#[tokio::test]
async fn merge_accumulates_quantities_across_writes() {
    let engine = Engine::with_defaults();

    for _ in 0..2 {
        engine
            .create_or_replace
            .execute(CreateOrReplaceBasketParams {
                customer_id: customer(),
                items: vec![item("p1", "12.99", 2)],
            })
            .await
            .unwrap();
    }

    let basket = engine
        .get
        .execute(GetBasketParams {
            customer_id: customer(),
        })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(basket.find_item("p1").unwrap().quantity, 4);
    assert_eq!(basket.total_amount(), amount("51.96"));
}

#[tokio::test]
async fn setting_items_twice_matches_setting_once() {
    let engine = Engine::with_defaults();
    let params = || UpsertBasketItemsParams {
        customer_id: customer(),
        items: vec![item("p1", "12.99", 2), item("p2", "5.00", 1)],
    };

    let once = engine.upsert.execute(params()).await.unwrap();
    let stored_once = engine.store.get("basket:customer-1");
    let twice = engine.upsert.execute(params()).await.unwrap();

    assert_eq!(once, twice);
    assert_eq!(engine.store.get("basket:customer-1"), stored_once);
    assert_eq!(twice.total_amount(), amount("30.98"));
}

#[tokio::test]
async fn decreasing_past_zero_removes_the_line() {
    let engine = Engine::with_defaults();
    engine
        .upsert
        .execute(UpsertBasketItemsParams {
            customer_id: customer(),
            items: vec![item("p1", "2.50", 2), item("p2", "1.00", 1)],
        })
        .await
        .unwrap();

    let update = engine
        .decrease
        .execute(DecreaseItemQuantityParams {
            customer_id: customer(),
            product_id: "p1".to_string(),
            quantity: 7,
        })
        .await
        .unwrap();

    let BasketUpdate::Updated(basket) = update else {
        panic!("basket should survive while other lines remain");
    };
    assert!(basket.find_item("p1").is_none());
    assert!(basket.items().iter().all(|line| line.quantity > 0));
    assert_eq!(basket.total_amount(), amount("1.00"));
}

#[tokio::test]
async fn removing_last_item_deletes_basket_when_enabled() {
    let engine = Engine::new(
        BasketOptions {
            auto_delete_empty_on_item_remove: true,
            ..BasketOptions::default()
        },
        LockOptions::default(),
    );
    engine
        .upsert
        .execute(UpsertBasketItemsParams {
            customer_id: customer(),
            items: vec![item("p1", "2.50", 1)],
        })
        .await
        .unwrap();

    let update = engine
        .remove
        .execute(RemoveBasketItemParams {
            customer_id: customer(),
            product_id: "p1".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(update, BasketUpdate::Deleted);
    let stored = engine
        .get
        .execute(GetBasketParams {
            customer_id: customer(),
        })
        .await
        .unwrap();
    assert!(stored.is_none());
}

#[tokio::test(start_paused = true)]
async fn busy_lock_fails_within_max_wait() {
    let engine = Engine::new(
        BasketOptions::default(),
        LockOptions::new(
            Duration::from_secs(5),
            Duration::from_millis(20),
            Duration::from_millis(200),
        ),
    );
    engine
        .upsert
        .execute(UpsertBasketItemsParams {
            customer_id: customer(),
            items: vec![item("p1", "1.00", 1)],
        })
        .await
        .unwrap();
    assert!(engine.store.set_if_absent(
        "basket:customer-1:lock",
        "someone-else".to_string(),
        Some(Duration::from_secs(5)),
    ));

    let started = tokio::time::Instant::now();
    let result = engine
        .increase
        .execute(IncreaseItemQuantityParams {
            customer_id: customer(),
            product_id: "p1".to_string(),
            quantity: 1,
        })
        .await;

    assert!(matches!(result.unwrap_err(), BasketError::Busy));
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(200));
    assert!(elapsed < Duration::from_millis(300));
    assert_eq!(
        engine.store.get("basket:customer-1:lock").as_deref(),
        Some("someone-else")
    );
}

#[tokio::test]
async fn basket_lifecycle_totals() {
    let engine = Engine::new(
        BasketOptions {
            create_or_replace_mode: CreateOrReplaceMode::Replace,
            ..BasketOptions::default()
        },
        LockOptions::default(),
    );

    let created = engine
        .create_or_replace
        .execute(CreateOrReplaceBasketParams {
            customer_id: customer(),
            items: vec![item("p1", "12.99", 2)],
        })
        .await
        .unwrap();
    assert_eq!(created.total_amount(), amount("25.98"));

    let increased = engine
        .increase
        .execute(IncreaseItemQuantityParams {
            customer_id: customer(),
            product_id: "p1".to_string(),
            quantity: 3,
        })
        .await
        .unwrap();
    assert_eq!(increased.total_amount(), amount("64.95"));

    let decreased = engine
        .decrease
        .execute(DecreaseItemQuantityParams {
            customer_id: customer(),
            product_id: "p1".to_string(),
            quantity: 10,
        })
        .await
        .unwrap();
    let BasketUpdate::Updated(emptied) = decreased else {
        panic!("auto delete is disabled by default");
    };
    assert!(emptied.is_empty());
    assert_eq!(emptied.total_amount(), amount("0.00"));
}

#[tokio::test(start_paused = true)]
async fn every_write_slides_the_record_expiry() {
    let engine = Engine::with_defaults();
    let ttl = StoreOptions::default().record_ttl;
    engine
        .upsert
        .execute(UpsertBasketItemsParams {
            customer_id: customer(),
            items: vec![item("p1", "1.00", 1)],
        })
        .await
        .unwrap();

    tokio::time::advance(Duration::from_secs(60 * 60)).await;
    assert!(engine.store.ttl("basket:customer-1").unwrap() < ttl);

    engine
        .increase
        .execute(IncreaseItemQuantityParams {
            customer_id: customer(),
            product_id: "p1".to_string(),
            quantity: 1,
        })
        .await
        .unwrap();
    assert_eq!(engine.store.ttl("basket:customer-1"), Some(ttl));
}
