#[derive(Debug, thiserror::Error)]
pub enum BasketError {
    #[error("basket.customer_id_empty")]
    CustomerIdEmpty,
    #[error("basket.product_id_empty")]
    ProductIdEmpty,
    #[error("basket.quantity_not_positive")]
    QuantityNotPositive,
    #[error("basket.price_negative")]
    PriceNegative,
    #[error("basket.items_empty")]
    ItemsEmpty,
    #[error("basket.invalid_quantity")]
    InvalidQuantity,
    #[error("basket.not_found")]
    NotFound,
    #[error("basket.item_not_found")]
    ItemNotFound,
    #[error("basket.busy")]
    Busy,
    #[error("repository.unavailable")]
    Repository(#[from] crate::domain::errors::RepositoryError),
}
