use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_traits::ToPrimitive;
use poem_openapi::Object;

use business::domain::basket::errors::BasketError;
use business::domain::basket::model::{Basket, BasketLineItem};

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct BasketItemRequest {
    /// Product identifier (cannot be blank)
    pub product_id: String,
    /// Display name of the product (cannot be blank)
    pub product_name: String,
    /// Price of one unit (zero or more)
    pub unit_price: f64,
    /// Number of units (greater than zero)
    pub quantity: i32,
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct CreateOrReplaceBasketRequest {
    /// Owner of the basket
    pub customer_id: String,
    /// Lines to merge into (or replace) the basket
    pub items: Vec<BasketItemRequest>,
}

#[derive(Debug, Clone, Object)]
pub struct SetBasketItemsRequest {
    /// Full list of lines; the stored basket becomes exactly this list
    pub items: Vec<BasketItemRequest>,
}

#[derive(Debug, Clone, Object)]
pub struct ChangeQuantityRequest {
    /// Units to add or take away (greater than zero)
    pub quantity: i32,
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct BasketItemResponse {
    pub product_id: String,
    pub product_name: String,
    pub unit_price: f64,
    pub quantity: i32,
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct BasketResponse {
    pub customer_id: String,
    pub items: Vec<BasketItemResponse>,
    /// Sum of unit price times quantity over all lines
    pub total_amount: f64,
}

impl From<Basket> for BasketResponse {
    fn from(basket: Basket) -> Self {
        Self {
            customer_id: basket.customer_id().to_string(),
            total_amount: to_float(&basket.total_amount()),
            items: basket
                .items()
                .iter()
                .map(|item| BasketItemResponse {
                    product_id: item.product_id.clone(),
                    product_name: item.product_name.clone(),
                    unit_price: to_float(&item.unit_price),
                    quantity: item.quantity,
                })
                .collect(),
        }
    }
}

impl BasketItemRequest {
    fn into_line_item(self) -> Result<BasketLineItem, String> {
        let unit_price = to_decimal(self.unit_price).ok_or("basket.price_invalid")?;
        let item = BasketLineItem::new(
            &self.product_id,
            &self.product_name,
            unit_price,
            self.quantity,
        )
        .map_err(|e| e.to_string())?;
        if item.product_name.is_empty() {
            return Err("basket.product_name_empty".to_string());
        }
        Ok(item)
    }
}

/// Validates request lines, returning the error code of the first bad one.
pub fn to_line_items(items: Vec<BasketItemRequest>) -> Result<Vec<BasketLineItem>, String> {
    if items.is_empty() {
        return Err(BasketError::ItemsEmpty.to_string());
    }
    items
        .into_iter()
        .map(BasketItemRequest::into_line_item)
        .collect()
}

// Goes through the shortest decimal rendering so 12.99 stays 12.99.
fn to_decimal(value: f64) -> Option<BigDecimal> {
    if !value.is_finite() {
        return None;
    }
    BigDecimal::from_str(&value.to_string()).ok()
}

fn to_float(value: &BigDecimal) -> f64 {
    value.to_f64().unwrap_or_default()
}
