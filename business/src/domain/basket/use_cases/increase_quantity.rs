use async_trait::async_trait;

use crate::domain::basket::errors::BasketError;
use crate::domain::basket::model::Basket;
use crate::domain::shared::value_objects::CustomerId;

pub struct IncreaseItemQuantityParams {
    pub customer_id: CustomerId,
    pub product_id: String,
    pub quantity: i32,
}

#[async_trait]
pub trait IncreaseItemQuantityUseCase: Send + Sync {
    async fn execute(&self, params: IncreaseItemQuantityParams) -> Result<Basket, BasketError>;
}
