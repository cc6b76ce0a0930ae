use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::basket::errors::BasketError;
use crate::domain::basket::keys::BasketKeyspace;
use crate::domain::basket::lock::DistributedLock;
use crate::domain::basket::model::Basket;
use crate::domain::basket::repository::BasketRepository;
use crate::domain::basket::use_cases::increase_quantity::{
    IncreaseItemQuantityParams, IncreaseItemQuantityUseCase,
};
use crate::domain::logger::Logger;

pub struct IncreaseItemQuantityUseCaseImpl {
    pub repository: Arc<dyn BasketRepository>,
    pub lock: DistributedLock,
    pub keyspace: BasketKeyspace,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl IncreaseItemQuantityUseCase for IncreaseItemQuantityUseCaseImpl {
    async fn execute(&self, params: IncreaseItemQuantityParams) -> Result<Basket, BasketError> {
        if params.quantity <= 0 {
            return Err(BasketError::InvalidQuantity);
        }

        self.logger.info(&format!(
            "Increasing {} by {} in basket of customer {}",
            params.product_id, params.quantity, params.customer_id
        ));

        let customer_id = &params.customer_id;
        let product_id = params.product_id.as_str();
        let quantity = params.quantity;
        let repository = self.repository.as_ref();

        let basket = self
            .lock
            .with_lock(&self.keyspace.lock_key(customer_id), move || async move {
                let mut basket = repository
                    .get(customer_id)
                    .await?
                    .ok_or(BasketError::NotFound)?;
                basket.increase_quantity(product_id, quantity)?;
                repository.save(&basket).await?;
                Ok(basket)
            })
            .await?;

        self.logger.info(&format!(
            "Increased {} in basket of customer {}",
            product_id, customer_id
        ));
        Ok(basket)
    }
}
