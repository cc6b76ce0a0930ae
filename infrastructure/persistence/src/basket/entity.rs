use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Deserializer, Serialize};

use business::domain::basket::model::{Basket, BasketLineItem};
use business::domain::errors::RepositoryError;
use business::domain::shared::value_objects::CustomerId;

/// Stored document of one basket line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketItemEntity {
    pub product_id: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(deserialize_with = "decimal")]
    pub unit_price: BigDecimal,
    pub quantity: i32,
}

/// Stored document of a basket. `total_amount` is written for readers of the
/// raw record; the domain recomputes it from the items.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketEntity {
    pub customer_id: String,
    #[serde(default)]
    pub items: Vec<BasketItemEntity>,
    #[serde(deserialize_with = "decimal")]
    pub total_amount: BigDecimal,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DecimalText {
    Text(String),
    Number(serde_json::Number),
}

// Money is written as a string, but older records carry JSON numbers. Those
// are parsed from their shortest text form so 12.99 does not pick up binary
// float noise.
fn decimal<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match DecimalText::deserialize(deserializer)? {
        DecimalText::Text(text) => BigDecimal::from_str(text.trim()),
        DecimalText::Number(number) => BigDecimal::from_str(&number.to_string()),
    };
    parsed.map_err(serde::de::Error::custom)
}

impl BasketEntity {
    pub fn from_domain(basket: &Basket) -> Self {
        Self {
            customer_id: basket.customer_id().as_str().to_string(),
            items: basket
                .items()
                .iter()
                .map(|item| BasketItemEntity {
                    product_id: item.product_id.clone(),
                    product_name: item.product_name.clone(),
                    unit_price: item.unit_price.clone(),
                    quantity: item.quantity,
                })
                .collect(),
            total_amount: basket.total_amount(),
        }
    }

    pub fn into_domain(self) -> Result<Basket, RepositoryError> {
        let customer_id =
            CustomerId::parse(&self.customer_id).map_err(|_| RepositoryError::Serialization)?;
        let items = self
            .items
            .into_iter()
            .map(|item| {
                BasketLineItem::from_repository(
                    item.product_id,
                    item.product_name,
                    item.unit_price,
                    item.quantity,
                )
            })
            .collect();
        Ok(Basket::from_repository(customer_id, items))
    }
}

pub fn encode(basket: &Basket) -> Result<String, RepositoryError> {
    serde_json::to_string(&BasketEntity::from_domain(basket))
        .map_err(|_| RepositoryError::Serialization)
}

pub fn decode(raw: &str) -> Result<Basket, RepositoryError> {
    serde_json::from_str::<BasketEntity>(raw)
        .map_err(|_| RepositoryError::Serialization)?
        .into_domain()
}
