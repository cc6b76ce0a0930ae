use async_trait::async_trait;

use crate::domain::basket::errors::BasketError;
use crate::domain::basket::model::{Basket, BasketLineItem};
use crate::domain::shared::value_objects::CustomerId;

pub struct CreateOrReplaceBasketParams {
    pub customer_id: CustomerId,
    pub items: Vec<BasketLineItem>,
}

#[async_trait]
pub trait CreateOrReplaceBasketUseCase: Send + Sync {
    async fn execute(&self, params: CreateOrReplaceBasketParams) -> Result<Basket, BasketError>;
}
