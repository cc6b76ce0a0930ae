use crate::domain::shared::value_objects::CustomerId;

/// Key layout shared by the basket record and its lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasketKeyspace {
    prefix: String,
}

impl BasketKeyspace {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn record_key(&self, customer_id: &CustomerId) -> String {
        format!("{}:{}", self.prefix, customer_id)
    }

    pub fn lock_key(&self, customer_id: &CustomerId) -> String {
        format!("{}:{}:lock", self.prefix, customer_id)
    }
}

impl Default for BasketKeyspace {
    fn default() -> Self {
        Self::new("basket")
    }
}
