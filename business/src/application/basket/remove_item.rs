use std::sync::Arc;

use async_trait::async_trait;

use crate::application::basket::persist::save_or_delete_empty;
use crate::domain::basket::errors::BasketError;
use crate::domain::basket::keys::BasketKeyspace;
use crate::domain::basket::lock::DistributedLock;
use crate::domain::basket::model::BasketUpdate;
use crate::domain::basket::options::BasketOptions;
use crate::domain::basket::repository::BasketRepository;
use crate::domain::basket::use_cases::remove_item::{
    RemoveBasketItemParams, RemoveBasketItemUseCase,
};
use crate::domain::logger::Logger;

pub struct RemoveBasketItemUseCaseImpl {
    pub repository: Arc<dyn BasketRepository>,
    pub lock: DistributedLock,
    pub keyspace: BasketKeyspace,
    pub options: BasketOptions,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl RemoveBasketItemUseCase for RemoveBasketItemUseCaseImpl {
    async fn execute(&self, params: RemoveBasketItemParams) -> Result<BasketUpdate, BasketError> {
        self.logger.info(&format!(
            "Removing {} from basket of customer {}",
            params.product_id, params.customer_id
        ));

        let customer_id = &params.customer_id;
        let product_id = params.product_id.as_str();
        let repository = self.repository.as_ref();
        let options = &self.options;
        let logger = self.logger.as_ref();

        self.lock
            .with_lock(&self.keyspace.lock_key(customer_id), move || async move {
                let mut basket = repository
                    .get(customer_id)
                    .await?
                    .ok_or(BasketError::NotFound)?;
                basket.remove_item(product_id)?;
                save_or_delete_empty(repository, options, logger, basket).await
            })
            .await
    }
}
