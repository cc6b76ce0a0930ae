use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::shared::value_objects::CustomerId;

use super::model::Basket;

#[async_trait]
pub trait BasketRepository: Send + Sync {
    async fn get(&self, customer_id: &CustomerId) -> Result<Option<Basket>, RepositoryError>;
    /// Writes the full record and restarts its time-to-live.
    async fn save(&self, basket: &Basket) -> Result<(), RepositoryError>;
    /// Returns whether a record existed.
    async fn delete(&self, customer_id: &CustomerId) -> Result<bool, RepositoryError>;
    async fn ping(&self) -> Result<(), RepositoryError>;
}
