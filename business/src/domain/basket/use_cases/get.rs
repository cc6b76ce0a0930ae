use async_trait::async_trait;

use crate::domain::basket::errors::BasketError;
use crate::domain::basket::model::Basket;
use crate::domain::shared::value_objects::CustomerId;

pub struct GetBasketParams {
    pub customer_id: CustomerId,
}

#[async_trait]
pub trait GetBasketUseCase: Send + Sync {
    /// `Ok(None)` when the customer has no basket.
    async fn execute(&self, params: GetBasketParams) -> Result<Option<Basket>, BasketError>;
}
