use std::env;
use std::str::FromStr;
use std::time::Duration;

use business::domain::basket::options::{
    BasketOptions, CreateOrReplaceMode, LockOptions, MAX_LOCK_HOLD, MAX_LOCK_MAX_WAIT,
    MAX_LOCK_RETRY, MAX_TTL_DAYS, StoreOptions,
};
use thiserror::Error;

const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";
const DEFAULT_KEY_PREFIX: &str = "basket";
const DEFAULT_TTL_DAYS: u64 = 30;

/// Backing store selected at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Redis,
    /// Process-local store, for local runs without a Redis server
    Memory,
}

#[derive(Debug, Error)]
#[error("config.unknown_store_backend")]
pub struct UnknownStoreBackend;

impl FromStr for StoreBackend {
    type Err = UnknownStoreBackend;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            _ => Err(UnknownStoreBackend),
        }
    }
}

/// Basket engine configuration
#[derive(Debug, Clone)]
pub struct BasketConfig {
    pub backend: StoreBackend,
    pub redis_url: String,
    pub store: StoreOptions,
    pub lock: LockOptions,
    pub options: BasketOptions,
}

impl BasketConfig {
    /// Load basket configuration from environment variables
    ///
    /// Environment variables:
    /// - BASKET_STORE: "redis" or "memory" (default: "redis")
    /// - REDIS_URL: Redis connection string (default: "redis://127.0.0.1:6379")
    /// - BASKET_KEY_PREFIX: Key prefix of records and locks (default: "basket")
    /// - BASKET_TTL_DAYS: Record time-to-live in days (default: 30, range: 1..=3650)
    /// - BASKET_LOCK_EXPIRY_SECONDS: Lock hold time (default: 5, range: 1..=3600)
    /// - BASKET_LOCK_RETRY_MS: Pause between lock attempts (default: 50, range: 1..=10000)
    /// - BASKET_LOCK_MAX_WAIT_MS: Give up on the lock after (default: 1000, range: 100..=600000)
    /// - BASKET_AUTO_DELETE_EMPTY: Delete baskets emptied by remove/decrease (default: false)
    /// - BASKET_CREATE_OR_REPLACE_MODE: "merge" or "replace" (default: "merge")
    ///
    /// Unparseable values fall back to their defaults; values past a maximum
    /// are capped to it.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = LockOptions::default();

        let backend = parse_or(&lookup, "BASKET_STORE", StoreBackend::default());
        let redis_url = lookup("REDIS_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_REDIS_URL.to_string());
        let key_prefix = lookup("BASKET_KEY_PREFIX")
            .map(|prefix| prefix.trim().to_string())
            .filter(|prefix| !prefix.is_empty())
            .unwrap_or_else(|| DEFAULT_KEY_PREFIX.to_string());
        let ttl_days = parse_capped(&lookup, "BASKET_TTL_DAYS", DEFAULT_TTL_DAYS, MAX_TTL_DAYS);

        let hold = parse_capped(
            &lookup,
            "BASKET_LOCK_EXPIRY_SECONDS",
            defaults.hold.as_secs(),
            MAX_LOCK_HOLD.as_secs(),
        );
        let retry = parse_capped(
            &lookup,
            "BASKET_LOCK_RETRY_MS",
            defaults.retry_interval.as_millis() as u64,
            MAX_LOCK_RETRY.as_millis() as u64,
        );
        let max_wait = parse_capped(
            &lookup,
            "BASKET_LOCK_MAX_WAIT_MS",
            defaults.max_wait.as_millis() as u64,
            MAX_LOCK_MAX_WAIT.as_millis() as u64,
        );

        Self {
            backend,
            redis_url,
            store: StoreOptions::new(key_prefix, ttl_days),
            lock: LockOptions::new(
                Duration::from_secs(hold),
                Duration::from_millis(retry),
                Duration::from_millis(max_wait),
            ),
            options: BasketOptions {
                auto_delete_empty_on_item_remove: parse_or(
                    &lookup,
                    "BASKET_AUTO_DELETE_EMPTY",
                    false,
                ),
                create_or_replace_mode: parse_or(
                    &lookup,
                    "BASKET_CREATE_OR_REPLACE_MODE",
                    CreateOrReplaceMode::default(),
                ),
            },
        }
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> T {
    match lookup(name) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(variable = name, value = %raw, "ignoring invalid configuration value");
            default
        }),
        None => default,
    }
}

fn parse_capped(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: u64,
    max: u64,
) -> u64 {
    let value = parse_or(lookup, name, default);
    if value > max {
        tracing::warn!(variable = name, value, max, "capping configuration value");
        return max;
    }
    value
}
