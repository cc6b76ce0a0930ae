use async_trait::async_trait;

use crate::domain::basket::errors::BasketError;
use crate::domain::basket::model::BasketUpdate;
use crate::domain::shared::value_objects::CustomerId;

pub struct RemoveBasketItemParams {
    pub customer_id: CustomerId,
    pub product_id: String,
}

#[async_trait]
pub trait RemoveBasketItemUseCase: Send + Sync {
    async fn execute(&self, params: RemoveBasketItemParams) -> Result<BasketUpdate, BasketError>;
}
