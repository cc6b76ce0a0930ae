use async_trait::async_trait;

use crate::domain::basket::errors::BasketError;
use crate::domain::shared::value_objects::CustomerId;

pub struct DeleteBasketParams {
    pub customer_id: CustomerId,
}

#[async_trait]
pub trait DeleteBasketUseCase: Send + Sync {
    /// Returns whether a basket existed.
    async fn execute(&self, params: DeleteBasketParams) -> Result<bool, BasketError>;
}
