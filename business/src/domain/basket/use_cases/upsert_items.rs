use async_trait::async_trait;

use crate::domain::basket::errors::BasketError;
use crate::domain::basket::model::{Basket, BasketLineItem};
use crate::domain::shared::value_objects::CustomerId;

pub struct UpsertBasketItemsParams {
    pub customer_id: CustomerId,
    pub items: Vec<BasketLineItem>,
}

#[async_trait]
pub trait UpsertBasketItemsUseCase: Send + Sync {
    async fn execute(&self, params: UpsertBasketItemsParams) -> Result<Basket, BasketError>;
}
