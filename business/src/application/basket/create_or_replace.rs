use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::basket::errors::BasketError;
use crate::domain::basket::keys::BasketKeyspace;
use crate::domain::basket::lock::DistributedLock;
use crate::domain::basket::model::Basket;
use crate::domain::basket::options::{BasketOptions, CreateOrReplaceMode};
use crate::domain::basket::repository::BasketRepository;
use crate::domain::basket::use_cases::create_or_replace::{
    CreateOrReplaceBasketParams, CreateOrReplaceBasketUseCase,
};
use crate::domain::logger::Logger;

pub struct CreateOrReplaceBasketUseCaseImpl {
    pub repository: Arc<dyn BasketRepository>,
    pub lock: DistributedLock,
    pub keyspace: BasketKeyspace,
    pub options: BasketOptions,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl CreateOrReplaceBasketUseCase for CreateOrReplaceBasketUseCaseImpl {
    async fn execute(&self, params: CreateOrReplaceBasketParams) -> Result<Basket, BasketError> {
        if params.items.is_empty() {
            return Err(BasketError::ItemsEmpty);
        }

        let CreateOrReplaceBasketParams { customer_id, items } = params;
        self.logger.info(&format!(
            "Writing basket of customer {} ({} mode, {} items)",
            customer_id,
            self.options.create_or_replace_mode,
            items.len()
        ));

        match self.options.create_or_replace_mode {
            // Unlocked: last writer wins, even over a concurrent locked operation.
            CreateOrReplaceMode::Replace => {
                let basket = Basket::with_items(customer_id, items)?;
                self.repository.save(&basket).await?;
                Ok(basket)
            }
            CreateOrReplaceMode::Merge => {
                let customer_id = &customer_id;
                let repository = self.repository.as_ref();
                let lock_key = self.keyspace.lock_key(customer_id);

                let basket = self
                    .lock
                    .with_lock(&lock_key, move || async move {
                        let mut basket = repository
                            .get(customer_id)
                            .await?
                            .unwrap_or_else(|| Basket::new(customer_id.clone()));
                        for item in items {
                            basket.merge_item(item)?;
                        }
                        repository.save(&basket).await?;
                        Ok(basket)
                    })
                    .await
                    .inspect_err(|e| {
                        self.logger
                            .warn(&format!("Merge into basket of {} failed: {}", customer_id, e))
                    })?;

                self.logger.info(&format!(
                    "Basket of customer {} now holds {} lines",
                    customer_id,
                    basket.items().len()
                ));
                Ok(basket)
            }
        }
    }
}
