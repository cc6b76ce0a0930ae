use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::basket::errors::BasketError;
use crate::domain::basket::model::Basket;
use crate::domain::basket::repository::BasketRepository;
use crate::domain::basket::use_cases::get::{GetBasketParams, GetBasketUseCase};
use crate::domain::logger::Logger;

pub struct GetBasketUseCaseImpl {
    pub repository: Arc<dyn BasketRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetBasketUseCase for GetBasketUseCaseImpl {
    async fn execute(&self, params: GetBasketParams) -> Result<Option<Basket>, BasketError> {
        self.logger
            .debug(&format!("Fetching basket of customer {}", params.customer_id));
        let basket = self.repository.get(&params.customer_id).await?;
        if basket.is_none() {
            self.logger
                .info(&format!("No basket for customer {}", params.customer_id));
        }
        Ok(basket)
    }
}
