use std::time::Duration;

use strum_macros::{Display, EnumString};

/// Behaviour of the create-or-replace entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CreateOrReplaceMode {
    /// Incoming quantities are added to matching lines under the basket lock.
    #[default]
    Merge,
    /// The whole basket is overwritten without locking.
    Replace,
}

#[derive(Debug, Clone, Default)]
pub struct BasketOptions {
    pub auto_delete_empty_on_item_remove: bool,
    pub create_or_replace_mode: CreateOrReplaceMode,
}

pub const MIN_LOCK_HOLD: Duration = Duration::from_secs(1);
pub const MIN_LOCK_RETRY: Duration = Duration::from_millis(1);
pub const MIN_LOCK_MAX_WAIT: Duration = Duration::from_millis(100);
pub const MAX_LOCK_HOLD: Duration = Duration::from_secs(60 * 60);
pub const MAX_LOCK_RETRY: Duration = Duration::from_secs(10);
pub const MAX_LOCK_MAX_WAIT: Duration = Duration::from_secs(10 * 60);

/// Timing of the per-customer distributed lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockOptions {
    /// Lock time-to-live; bounds how long a crashed holder can block others.
    pub hold: Duration,
    pub retry_interval: Duration,
    pub max_wait: Duration,
}

impl LockOptions {
    /// Builds options, clamping each value into its allowed range.
    pub fn new(hold: Duration, retry_interval: Duration, max_wait: Duration) -> Self {
        Self {
            hold: hold.clamp(MIN_LOCK_HOLD, MAX_LOCK_HOLD),
            retry_interval: retry_interval.clamp(MIN_LOCK_RETRY, MAX_LOCK_RETRY),
            max_wait: max_wait.clamp(MIN_LOCK_MAX_WAIT, MAX_LOCK_MAX_WAIT),
        }
    }
}

impl Default for LockOptions {
    fn default() -> Self {
        Self {
            hold: Duration::from_secs(5),
            retry_interval: Duration::from_millis(50),
            max_wait: Duration::from_millis(1000),
        }
    }
}

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;
pub const MAX_TTL_DAYS: u64 = 10 * 365;

/// Layout and expiry of persisted basket records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    pub key_prefix: String,
    pub record_ttl: Duration,
}

impl StoreOptions {
    /// Builds options; the TTL is kept between one day and [`MAX_TTL_DAYS`].
    pub fn new(key_prefix: impl Into<String>, ttl_days: u64) -> Self {
        Self {
            key_prefix: key_prefix.into(),
            record_ttl: Duration::from_secs(ttl_days.clamp(1, MAX_TTL_DAYS) * SECONDS_PER_DAY),
        }
    }
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self::new("basket", 30)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_mode_case_insensitively() {
        assert_eq!(
            "Replace".parse::<CreateOrReplaceMode>().unwrap(),
            CreateOrReplaceMode::Replace
        );
        assert_eq!(
            "merge".parse::<CreateOrReplaceMode>().unwrap(),
            CreateOrReplaceMode::Merge
        );
        assert!("upsert".parse::<CreateOrReplaceMode>().is_err());
    }

    #[test]
    fn should_default_to_merge_without_auto_delete() {
        let options = BasketOptions::default();

        assert_eq!(options.create_or_replace_mode, CreateOrReplaceMode::Merge);
        assert!(!options.auto_delete_empty_on_item_remove);
    }

    #[test]
    fn should_clamp_lock_options_to_minimums() {
        let options = LockOptions::new(Duration::ZERO, Duration::ZERO, Duration::from_millis(10));

        assert_eq!(options.hold, Duration::from_secs(1));
        assert_eq!(options.retry_interval, Duration::from_millis(1));
        assert_eq!(options.max_wait, Duration::from_millis(100));
    }

    #[test]
    fn should_cap_huge_lock_options() {
        let options = LockOptions::new(Duration::MAX, Duration::MAX, Duration::MAX);

        assert_eq!(options.hold, MAX_LOCK_HOLD);
        assert_eq!(options.retry_interval, MAX_LOCK_RETRY);
        assert_eq!(options.max_wait, MAX_LOCK_MAX_WAIT);
    }

    #[test]
    fn should_cap_ttl_without_overflow() {
        let options = StoreOptions::new("basket", u64::MAX);

        assert_eq!(
            options.record_ttl,
            Duration::from_secs(MAX_TTL_DAYS * SECONDS_PER_DAY)
        );
    }

    #[test]
    fn should_clamp_ttl_to_one_day() {
        let options = StoreOptions::new("basket", 0);

        assert_eq!(options.record_ttl, Duration::from_secs(SECONDS_PER_DAY));
        assert_eq!(
            StoreOptions::default().record_ttl,
            Duration::from_secs(30 * SECONDS_PER_DAY)
        );
    }
}
