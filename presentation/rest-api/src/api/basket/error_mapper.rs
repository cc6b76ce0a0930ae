use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::basket::errors::BasketError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for BasketError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name) = match &self {
            BasketError::CustomerIdEmpty
            | BasketError::ProductIdEmpty
            | BasketError::QuantityNotPositive
            | BasketError::PriceNegative
            | BasketError::ItemsEmpty
            | BasketError::InvalidQuantity => (StatusCode::BAD_REQUEST, "ValidationError"),
            BasketError::NotFound | BasketError::ItemNotFound => {
                (StatusCode::NOT_FOUND, "NotFound")
            }
            BasketError::Busy => (StatusCode::TOO_MANY_REQUESTS, "Busy"),
            BasketError::Repository(_) => (StatusCode::INTERNAL_SERVER_ERROR, "InternalError"),
        };

        (
            status,
            Json(ErrorResponse {
                name: name.to_string(),
                message: self.to_string(),
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use business::domain::errors::RepositoryError;

    #[test]
    fn should_map_each_error_kind_to_its_status() {
        let cases = [
            (BasketError::InvalidQuantity, 400, "basket.invalid_quantity"),
            (BasketError::ItemsEmpty, 400, "basket.items_empty"),
            (BasketError::NotFound, 404, "basket.not_found"),
            (BasketError::ItemNotFound, 404, "basket.item_not_found"),
            (BasketError::Busy, 429, "basket.busy"),
            (
                BasketError::Repository(RepositoryError::Unavailable),
                500,
                "repository.unavailable",
            ),
        ];

        for (error, status, message) in cases {
            let (actual_status, json) = error.into_error_response();
            assert_eq!(actual_status.as_u16(), status);
            assert_eq!(json.0.message, message);
        }
    }
}
