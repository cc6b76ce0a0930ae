use serde::{Deserialize, Serialize};

use crate::domain::basket::errors::BasketError;

/// Identifies the owner of a basket.
/// Always trimmed and never blank; it is the identity key in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerId(String);

impl CustomerId {
    /// Validates and trims a raw identifier.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, BasketError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(BasketError::CustomerIdEmpty);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for CustomerId {
    type Error = BasketError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CustomerId {
    type Error = BasketError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}
