use crate::domain::basket::errors::BasketError;
use crate::domain::basket::model::{Basket, BasketUpdate};
use crate::domain::basket::options::BasketOptions;
use crate::domain::basket::repository::BasketRepository;
use crate::domain::logger::Logger;

/// Writes a basket that just lost a line, or deletes its record when it is
/// empty and the auto-delete policy is on.
pub(crate) async fn save_or_delete_empty(
    repository: &dyn BasketRepository,
    options: &BasketOptions,
    logger: &dyn Logger,
    basket: Basket,
) -> Result<BasketUpdate, BasketError> {
    if basket.is_empty() && options.auto_delete_empty_on_item_remove {
        repository.delete(basket.customer_id()).await?;
        logger.info(&format!(
            "Basket of customer {} emptied and deleted",
            basket.customer_id()
        ));
        return Ok(BasketUpdate::Deleted);
    }

    repository.save(&basket).await?;
    Ok(BasketUpdate::Updated(basket))
}
