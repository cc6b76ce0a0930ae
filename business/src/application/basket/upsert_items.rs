use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::basket::errors::BasketError;
use crate::domain::basket::model::Basket;
use crate::domain::basket::repository::BasketRepository;
use crate::domain::basket::use_cases::upsert_items::{
    UpsertBasketItemsParams, UpsertBasketItemsUseCase,
};
use crate::domain::logger::Logger;

/// Idempotent overwrite of a basket's lines.
///
/// Runs without the basket lock: it does not read prior state, so a
/// concurrent locked operation may be overwritten by it or overwrite it.
pub struct UpsertBasketItemsUseCaseImpl {
    pub repository: Arc<dyn BasketRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl UpsertBasketItemsUseCase for UpsertBasketItemsUseCaseImpl {
    async fn execute(&self, params: UpsertBasketItemsParams) -> Result<Basket, BasketError> {
        if params.items.is_empty() {
            return Err(BasketError::ItemsEmpty);
        }

        self.logger.info(&format!(
            "Setting {} items on basket of customer {}",
            params.items.len(),
            params.customer_id
        ));

        let basket = Basket::with_items(params.customer_id, params.items)?;
        self.repository.save(&basket).await?;

        self.logger.info(&format!(
            "Basket of customer {} set",
            basket.customer_id()
        ));
        Ok(basket)
    }
}
