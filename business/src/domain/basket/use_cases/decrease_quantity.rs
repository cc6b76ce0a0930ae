use async_trait::async_trait;

use crate::domain::basket::errors::BasketError;
use crate::domain::basket::model::BasketUpdate;
use crate::domain::shared::value_objects::CustomerId;

pub struct DecreaseItemQuantityParams {
    pub customer_id: CustomerId,
    pub product_id: String,
    pub quantity: i32,
}

#[async_trait]
pub trait DecreaseItemQuantityUseCase: Send + Sync {
    async fn execute(&self, params: DecreaseItemQuantityParams)
    -> Result<BasketUpdate, BasketError>;
}
