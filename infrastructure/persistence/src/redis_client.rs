use std::time::Duration;

use business::domain::errors::RepositoryError;
use redis::{Client, RedisError, aio::ConnectionManager};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConnectionError {
    #[error("redis.invalid_url")]
    InvalidUrl,
    #[error("redis.connection_error")]
    ConnectionError,
}

/// Configuration for the Redis connection
pub struct RedisConfig {
    pub url: String,
    pub connect_timeout: Duration,
}

impl RedisConfig {
    /// Creates a new Redis configuration with default values
    pub fn new(url: String) -> Self {
        Self {
            url,
            connect_timeout: Duration::from_secs(5),
        }
    }
}

/// Opens a multiplexed, auto-reconnecting Redis connection
pub async fn create_redis_connection(
    config: &RedisConfig,
) -> Result<ConnectionManager, ConnectionError> {
    let client = Client::open(config.url.as_str()).map_err(|_| ConnectionError::InvalidUrl)?;

    tokio::time::timeout(config.connect_timeout, ConnectionManager::new(client))
        .await
        .map_err(|_| ConnectionError::ConnectionError)?
        .map_err(|_| ConnectionError::ConnectionError)
}

/// Maps a Redis client failure to the domain's backend error.
pub(crate) fn unavailable(err: RedisError) -> RepositoryError {
    tracing::error!(error = %err, "redis command failed");
    RepositoryError::Unavailable
}
