use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::basket::errors::BasketError;
use crate::domain::basket::repository::BasketRepository;
use crate::domain::basket::use_cases::delete::{DeleteBasketParams, DeleteBasketUseCase};
use crate::domain::logger::Logger;

pub struct DeleteBasketUseCaseImpl {
    pub repository: Arc<dyn BasketRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl DeleteBasketUseCase for DeleteBasketUseCaseImpl {
    async fn execute(&self, params: DeleteBasketParams) -> Result<bool, BasketError> {
        self.logger
            .info(&format!("Deleting basket of customer {}", params.customer_id));

        let existed = self.repository.delete(&params.customer_id).await?;

        if existed {
            self.logger
                .info(&format!("Basket of customer {} deleted", params.customer_id));
        }
        Ok(existed)
    }
}
