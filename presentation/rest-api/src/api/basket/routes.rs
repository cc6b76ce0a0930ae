use std::sync::Arc;

use poem_openapi::{OpenApi, param::Path, payload::Json};

use business::domain::basket::errors::BasketError;
use business::domain::basket::model::BasketUpdate;
use business::domain::basket::use_cases::create_or_replace::{
    CreateOrReplaceBasketParams, CreateOrReplaceBasketUseCase,
};
use business::domain::basket::use_cases::decrease_quantity::{
    DecreaseItemQuantityParams, DecreaseItemQuantityUseCase,
};
use business::domain::basket::use_cases::delete::{DeleteBasketParams, DeleteBasketUseCase};
use business::domain::basket::use_cases::get::{GetBasketParams, GetBasketUseCase};
use business::domain::basket::use_cases::increase_quantity::{
    IncreaseItemQuantityParams, IncreaseItemQuantityUseCase,
};
use business::domain::basket::use_cases::remove_item::{
    RemoveBasketItemParams, RemoveBasketItemUseCase,
};
use business::domain::basket::use_cases::upsert_items::{
    UpsertBasketItemsParams, UpsertBasketItemsUseCase,
};
use business::domain::shared::value_objects::CustomerId;

use crate::api::basket::dto::{
    BasketResponse, ChangeQuantityRequest, CreateOrReplaceBasketRequest, SetBasketItemsRequest,
    to_line_items,
};
use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::tags::ApiTags;

pub struct BasketApi {
    get_use_case: Arc<dyn GetBasketUseCase>,
    create_or_replace_use_case: Arc<dyn CreateOrReplaceBasketUseCase>,
    upsert_items_use_case: Arc<dyn UpsertBasketItemsUseCase>,
    increase_use_case: Arc<dyn IncreaseItemQuantityUseCase>,
    decrease_use_case: Arc<dyn DecreaseItemQuantityUseCase>,
    remove_item_use_case: Arc<dyn RemoveBasketItemUseCase>,
    delete_use_case: Arc<dyn DeleteBasketUseCase>,
}

impl BasketApi {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        get_use_case: Arc<dyn GetBasketUseCase>,
        create_or_replace_use_case: Arc<dyn CreateOrReplaceBasketUseCase>,
        upsert_items_use_case: Arc<dyn UpsertBasketItemsUseCase>,
        increase_use_case: Arc<dyn IncreaseItemQuantityUseCase>,
        decrease_use_case: Arc<dyn DecreaseItemQuantityUseCase>,
        remove_item_use_case: Arc<dyn RemoveBasketItemUseCase>,
        delete_use_case: Arc<dyn DeleteBasketUseCase>,
    ) -> Self {
        Self {
            get_use_case,
            create_or_replace_use_case,
            upsert_items_use_case,
            increase_use_case,
            decrease_use_case,
            remove_item_use_case,
            delete_use_case,
        }
    }
}

/// Shopping basket API
///
/// Per-customer baskets kept in the key-value store. Quantity changes are
/// serialized per customer; a contended basket answers 429.
#[OpenApi]
impl BasketApi {
    /// Get a basket
    #[oai(
        path = "/api/v1/baskets/:customer_id",
        method = "get",
        tag = "ApiTags::Baskets"
    )]
    async fn get(&self, customer_id: Path<String>) -> GetBasketResponse {
        let customer_id = match CustomerId::parse(&customer_id.0) {
            Ok(id) => id,
            Err(err) => return GetBasketResponse::from_error(err),
        };

        match self
            .get_use_case
            .execute(GetBasketParams { customer_id })
            .await
        {
            Ok(Some(basket)) => GetBasketResponse::Ok(Json(basket.into())),
            Ok(None) => GetBasketResponse::from_error(BasketError::NotFound),
            Err(err) => GetBasketResponse::from_error(err),
        }
    }

    /// Add to a basket
    ///
    /// In merge mode (default) matching lines gain the incoming quantity and
    /// new lines are appended. In replace mode the basket is overwritten.
    #[oai(path = "/api/v1/baskets", method = "post", tag = "ApiTags::Baskets")]
    async fn create_or_replace(
        &self,
        body: Json<CreateOrReplaceBasketRequest>,
    ) -> SaveBasketResponse {
        let CreateOrReplaceBasketRequest { customer_id, items } = body.0;
        let customer_id = match CustomerId::parse(&customer_id) {
            Ok(id) => id,
            Err(err) => return SaveBasketResponse::from_error(err),
        };
        let items = match to_line_items(items) {
            Ok(items) => items,
            Err(message) => {
                return SaveBasketResponse::BadRequest(ErrorResponse::validation(message));
            }
        };

        match self
            .create_or_replace_use_case
            .execute(CreateOrReplaceBasketParams { customer_id, items })
            .await
        {
            Ok(basket) => SaveBasketResponse::Ok(Json(basket.into())),
            Err(err) => SaveBasketResponse::from_error(err),
        }
    }

    /// Set basket items
    ///
    /// Overwrites the basket with exactly the given lines. Idempotent.
    #[oai(
        path = "/api/v1/baskets/:customer_id/items",
        method = "put",
        tag = "ApiTags::Baskets"
    )]
    async fn set_items(
        &self,
        customer_id: Path<String>,
        body: Json<SetBasketItemsRequest>,
    ) -> SaveBasketResponse {
        let customer_id = match CustomerId::parse(&customer_id.0) {
            Ok(id) => id,
            Err(err) => return SaveBasketResponse::from_error(err),
        };
        let items = match to_line_items(body.0.items) {
            Ok(items) => items,
            Err(message) => {
                return SaveBasketResponse::BadRequest(ErrorResponse::validation(message));
            }
        };

        match self
            .upsert_items_use_case
            .execute(UpsertBasketItemsParams { customer_id, items })
            .await
        {
            Ok(basket) => SaveBasketResponse::Ok(Json(basket.into())),
            Err(err) => SaveBasketResponse::from_error(err),
        }
    }

    /// Delete a basket
    #[oai(
        path = "/api/v1/baskets/:customer_id",
        method = "delete",
        tag = "ApiTags::Baskets"
    )]
    async fn delete(&self, customer_id: Path<String>) -> DeleteBasketResponse {
        let customer_id = match CustomerId::parse(&customer_id.0) {
            Ok(id) => id,
            Err(err) => return DeleteBasketResponse::from_error(err),
        };

        match self
            .delete_use_case
            .execute(DeleteBasketParams { customer_id })
            .await
        {
            Ok(true) => DeleteBasketResponse::NoContent,
            Ok(false) => DeleteBasketResponse::from_error(BasketError::NotFound),
            Err(err) => DeleteBasketResponse::from_error(err),
        }
    }

    /// Remove a line from a basket
    ///
    /// Answers 204 when the basket became empty and was deleted.
    #[oai(
        path = "/api/v1/baskets/:customer_id/items/:product_id",
        method = "delete",
        tag = "ApiTags::Baskets"
    )]
    async fn remove_item(
        &self,
        customer_id: Path<String>,
        product_id: Path<String>,
    ) -> ChangeBasketResponse {
        let customer_id = match CustomerId::parse(&customer_id.0) {
            Ok(id) => id,
            Err(err) => return ChangeBasketResponse::from_error(err),
        };

        let result = self
            .remove_item_use_case
            .execute(RemoveBasketItemParams {
                customer_id,
                product_id: product_id.0,
            })
            .await;
        ChangeBasketResponse::from_update(result)
    }

    /// Increase a line's quantity
    #[oai(
        path = "/api/v1/baskets/:customer_id/items/:product_id/increase",
        method = "post",
        tag = "ApiTags::Baskets"
    )]
    async fn increase(
        &self,
        customer_id: Path<String>,
        product_id: Path<String>,
        body: Json<ChangeQuantityRequest>,
    ) -> ChangeBasketResponse {
        let customer_id = match CustomerId::parse(&customer_id.0) {
            Ok(id) => id,
            Err(err) => return ChangeBasketResponse::from_error(err),
        };

        let result = self
            .increase_use_case
            .execute(IncreaseItemQuantityParams {
                customer_id,
                product_id: product_id.0,
                quantity: body.0.quantity,
            })
            .await;
        ChangeBasketResponse::from_update(result.map(BasketUpdate::Updated))
    }

    /// Decrease a line's quantity
    ///
    /// A line that reaches zero is removed. Answers 204 when the basket became
    /// empty and was deleted.
    #[oai(
        path = "/api/v1/baskets/:customer_id/items/:product_id/decrease",
        method = "post",
        tag = "ApiTags::Baskets"
    )]
    async fn decrease(
        &self,
        customer_id: Path<String>,
        product_id: Path<String>,
        body: Json<ChangeQuantityRequest>,
    ) -> ChangeBasketResponse {
        let customer_id = match CustomerId::parse(&customer_id.0) {
            Ok(id) => id,
            Err(err) => return ChangeBasketResponse::from_error(err),
        };

        let result = self
            .decrease_use_case
            .execute(DecreaseItemQuantityParams {
                customer_id,
                product_id: product_id.0,
                quantity: body.0.quantity,
            })
            .await;
        ChangeBasketResponse::from_update(result)
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetBasketResponse {
    #[oai(status = 200)]
    Ok(Json<BasketResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl GetBasketResponse {
    fn from_error(err: BasketError) -> Self {
        let (status, json) = err.into_error_response();
        match status.as_u16() {
            400 => Self::BadRequest(json),
            404 => Self::NotFound(json),
            _ => Self::InternalError(json),
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum SaveBasketResponse {
    #[oai(status = 200)]
    Ok(Json<BasketResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 429)]
    Busy(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl SaveBasketResponse {
    fn from_error(err: BasketError) -> Self {
        let (status, json) = err.into_error_response();
        match status.as_u16() {
            400 => Self::BadRequest(json),
            429 => Self::Busy(json),
            _ => Self::InternalError(json),
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum ChangeBasketResponse {
    #[oai(status = 200)]
    Ok(Json<BasketResponse>),
    /// The basket became empty and was deleted
    #[oai(status = 204)]
    Deleted,
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 429)]
    Busy(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl ChangeBasketResponse {
    fn from_update(result: Result<BasketUpdate, BasketError>) -> Self {
        match result {
            Ok(BasketUpdate::Updated(basket)) => Self::Ok(Json(basket.into())),
            Ok(BasketUpdate::Deleted) => Self::Deleted,
            Err(err) => Self::from_error(err),
        }
    }

    fn from_error(err: BasketError) -> Self {
        let (status, json) = err.into_error_response();
        match status.as_u16() {
            400 => Self::BadRequest(json),
            404 => Self::NotFound(json),
            429 => Self::Busy(json),
            _ => Self::InternalError(json),
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum DeleteBasketResponse {
    #[oai(status = 204)]
    NoContent,
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl DeleteBasketResponse {
    fn from_error(err: BasketError) -> Self {
        let (status, json) = err.into_error_response();
        match status.as_u16() {
            400 => Self::BadRequest(json),
            404 => Self::NotFound(json),
            _ => Self::InternalError(json),
        }
    }
}
