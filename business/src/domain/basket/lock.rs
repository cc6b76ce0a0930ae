use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{Instant, sleep};
use uuid::Uuid;

use crate::domain::errors::RepositoryError;

use super::errors::BasketError;
use super::options::{LockOptions, MAX_LOCK_MAX_WAIT};

/// Atomic primitives the distributed lock is built on.
#[async_trait]
pub trait LockStore: Send + Sync {
    /// Sets `key` to `token` with a `hold` expiry only if the key is absent.
    async fn try_acquire(
        &self,
        key: &str,
        token: &str,
        hold: Duration,
    ) -> Result<bool, RepositoryError>;
    /// Deletes `key` only while it still holds `token`, as a single atomic step.
    async fn release(&self, key: &str, token: &str) -> Result<bool, RepositoryError>;
}

/// Short-lived, token-guarded mutual exclusion on top of a [`LockStore`].
///
/// Safety relies on the critical section finishing well within
/// [`LockOptions::hold`]; past that the key expires and another caller may
/// acquire it. Release never deletes a lock owned by a different token.
#[derive(Clone)]
pub struct DistributedLock {
    store: Arc<dyn LockStore>,
    options: LockOptions,
}

impl DistributedLock {
    pub fn new(store: Arc<dyn LockStore>, options: LockOptions) -> Self {
        Self { store, options }
    }

    /// Retries until the lock is taken or `max_wait` elapses.
    ///
    /// `Ok(None)` means the lock stayed busy. Dropping the returned future
    /// stops the retry loop.
    pub async fn acquire(&self, key: &str) -> Result<Option<LockGuard>, RepositoryError> {
        let token = Uuid::new_v4().simple().to_string();
        let deadline = Instant::now() + self.options.max_wait.min(MAX_LOCK_MAX_WAIT);

        loop {
            if self
                .store
                .try_acquire(key, &token, self.options.hold)
                .await?
            {
                return Ok(Some(LockGuard {
                    store: self.store.clone(),
                    key: key.to_string(),
                    token,
                    released: false,
                }));
            }

            let now = Instant::now();
            if now >= deadline {
                return Ok(None);
            }
            sleep(self.options.retry_interval.min(deadline - now)).await;
        }
    }

    /// Runs `critical_section` while holding the lock on `key`.
    ///
    /// The lock is released on every exit path. A busy lock yields
    /// [`BasketError::Busy`] without running the critical section.
    pub async fn with_lock<T, F, Fut>(&self, key: &str, critical_section: F) -> Result<T, BasketError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, BasketError>>,
    {
        let guard = self.acquire(key).await?.ok_or(BasketError::Busy)?;
        let outcome = critical_section().await;
        // A failed release is left to the lock's own expiry.
        let _ = guard.release().await;
        outcome
    }
}

/// Proof of ownership of a held lock.
///
/// Call [`LockGuard::release`] when done. A guard dropped without release
/// (cancelled future, unwinding) schedules a best-effort release on the
/// current tokio runtime.
pub struct LockGuard {
    store: Arc<dyn LockStore>,
    key: String,
    token: String,
    released: bool,
}

impl LockGuard {
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns `false` when the lock had already expired or changed hands.
    pub async fn release(mut self) -> Result<bool, RepositoryError> {
        let result = self.store.release(&self.key, &self.token).await;
        self.released = true;
        result
    }
}

impl std::fmt::Debug for LockGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockGuard")
            .field("key", &self.key)
            .field("released", &self.released)
            .finish()
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let store = self.store.clone();
        let key = std::mem::take(&mut self.key);
        let token = std::mem::take(&mut self.token);
        handle.spawn(async move {
            let _ = store.release(&key, &token).await;
        });
    }
}
