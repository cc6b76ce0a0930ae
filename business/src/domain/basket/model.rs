use bigdecimal::BigDecimal;
use num_traits::Zero;

use super::errors::BasketError;
use crate::domain::shared::value_objects::CustomerId;

#[derive(Debug, Clone, PartialEq)]
pub struct BasketLineItem {
    pub product_id: String,
    pub product_name: String,
    pub unit_price: BigDecimal,
    pub quantity: i32,
}

impl BasketLineItem {
    pub fn new(
        product_id: impl AsRef<str>,
        product_name: impl AsRef<str>,
        unit_price: BigDecimal,
        quantity: i32,
    ) -> Result<Self, BasketError> {
        let product_id = product_id.as_ref().trim();
        if product_id.is_empty() {
            return Err(BasketError::ProductIdEmpty);
        }
        if quantity <= 0 {
            return Err(BasketError::QuantityNotPositive);
        }
        if unit_price < BigDecimal::zero() {
            return Err(BasketError::PriceNegative);
        }

        Ok(Self {
            product_id: product_id.to_string(),
            product_name: product_name.as_ref().trim().to_string(),
            unit_price,
            quantity,
        })
    }

    /// Constructor for data already persisted in the repository (no validation).
    pub fn from_repository(
        product_id: String,
        product_name: String,
        unit_price: BigDecimal,
        quantity: i32,
    ) -> Self {
        Self {
            product_id,
            product_name,
            unit_price,
            quantity,
        }
    }

    pub fn line_total(&self) -> BigDecimal {
        &self.unit_price * BigDecimal::from(self.quantity)
    }
}

/// A customer's basket. Product ids are unique and every quantity is positive.
#[derive(Debug, Clone, PartialEq)]
pub struct Basket {
    customer_id: CustomerId,
    items: Vec<BasketLineItem>,
}

impl Basket {
    pub fn new(customer_id: CustomerId) -> Self {
        Self {
            customer_id,
            items: Vec::new(),
        }
    }

    /// Builds a basket from a caller-supplied list.
    ///
    /// Repeated product ids collapse into one line whose quantity is the sum.
    pub fn with_items(
        customer_id: CustomerId,
        items: Vec<BasketLineItem>,
    ) -> Result<Self, BasketError> {
        let mut basket = Self::new(customer_id);
        for item in items {
            basket.merge_item(item)?;
        }
        Ok(basket)
    }

    /// Constructor for data already persisted in the repository (no validation).
    pub fn from_repository(customer_id: CustomerId, items: Vec<BasketLineItem>) -> Self {
        Self { customer_id, items }
    }

    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    pub fn items(&self) -> &[BasketLineItem] {
        &self.items
    }

    pub fn find_item(&self, product_id: &str) -> Option<&BasketLineItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_amount(&self) -> BigDecimal {
        self.items
            .iter()
            .fold(BigDecimal::zero(), |acc, item| acc + item.line_total())
    }

    /// Adds the incoming quantity to a matching line, keeping its name and price,
    /// or appends the item as a new line. A sum past `i32::MAX` is rejected and
    /// leaves the basket untouched.
    pub fn merge_item(&mut self, incoming: BasketLineItem) -> Result<(), BasketError> {
        match self
            .items
            .iter_mut()
            .find(|i| i.product_id == incoming.product_id)
        {
            Some(existing) => {
                existing.quantity = existing
                    .quantity
                    .checked_add(incoming.quantity)
                    .ok_or(BasketError::InvalidQuantity)?;
            }
            None => self.items.push(incoming),
        }
        Ok(())
    }

    pub fn increase_quantity(&mut self, product_id: &str, qty: i32) -> Result<(), BasketError> {
        if qty <= 0 {
            return Err(BasketError::InvalidQuantity);
        }
        let item = self
            .items
            .iter_mut()
            .find(|i| i.product_id == product_id)
            .ok_or(BasketError::ItemNotFound)?;
        item.quantity = item
            .quantity
            .checked_add(qty)
            .ok_or(BasketError::InvalidQuantity)?;
        Ok(())
    }

    /// Lowers the quantity of a line. A line that would reach zero or below is
    /// removed instead. Returns `true` when the line was removed.
    pub fn decrease_quantity(&mut self, product_id: &str, qty: i32) -> Result<bool, BasketError> {
        if qty <= 0 {
            return Err(BasketError::InvalidQuantity);
        }
        let index = self
            .items
            .iter()
            .position(|i| i.product_id == product_id)
            .ok_or(BasketError::ItemNotFound)?;

        let remaining = self.items[index].quantity - qty;
        if remaining <= 0 {
            self.items.remove(index);
            return Ok(true);
        }
        self.items[index].quantity = remaining;
        Ok(false)
    }

    pub fn remove_item(&mut self, product_id: &str) -> Result<(), BasketError> {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        if self.items.len() == before {
            return Err(BasketError::ItemNotFound);
        }
        Ok(())
    }
}

/// Outcome of an operation that can empty a basket.
#[derive(Debug, Clone, PartialEq)]
pub enum BasketUpdate {
    Updated(Basket),
    /// The basket became empty and its record was deleted.
    Deleted,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn price(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    fn customer() -> CustomerId {
        CustomerId::parse("c1").unwrap()
    }

    fn hammer(quantity: i32) -> BasketLineItem {
        BasketLineItem::new("p1", "Hammer", price("12.99"), quantity).unwrap()
    }

    #[test]
    fn should_create_line_item_when_valid() {
        let item = BasketLineItem::new(" p1 ", " Hammer ", price("12.99"), 2).unwrap();

        assert_eq!(item.product_id, "p1");
        assert_eq!(item.product_name, "Hammer");
        assert_eq!(item.line_total(), price("25.98"));
    }

    #[test]
    fn should_reject_blank_product_id() {
        let result = BasketLineItem::new("  ", "Hammer", price("1"), 1);

        assert!(matches!(result.unwrap_err(), BasketError::ProductIdEmpty));
    }

    #[test]
    fn should_reject_non_positive_quantity() {
        let result = BasketLineItem::new("p1", "Hammer", price("1"), 0);

        assert!(matches!(result.unwrap_err(), BasketError::QuantityNotPositive));
    }

    #[test]
    fn should_reject_negative_price() {
        let result = BasketLineItem::new("p1", "Hammer", price("-0.01"), 1);

        assert!(matches!(result.unwrap_err(), BasketError::PriceNegative));
    }

    #[test]
    fn should_allow_empty_product_name_and_zero_price() {
        let item = BasketLineItem::new("p1", "", price("0"), 1).unwrap();

        assert_eq!(item.product_name, "");
        assert_eq!(item.line_total(), BigDecimal::zero());
    }

    #[test]
    fn should_merge_quantities_into_single_line() {
        let mut basket = Basket::new(customer());
        basket.merge_item(hammer(2)).unwrap();
        basket.merge_item(hammer(2)).unwrap();

        assert_eq!(basket.items().len(), 1);
        assert_eq!(basket.items()[0].quantity, 4);
        assert_eq!(basket.total_amount(), price("51.96"));
    }

    #[test]
    fn should_keep_existing_name_and_price_when_merging() {
        let mut basket = Basket::with_items(customer(), vec![hammer(1)]).unwrap();
        basket
            .merge_item(BasketLineItem::new("p1", "Big Hammer", price("20"), 1).unwrap())
            .unwrap();

        let item = basket.find_item("p1").unwrap();
        assert_eq!(item.product_name, "Hammer");
        assert_eq!(item.unit_price, price("12.99"));
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn should_collapse_duplicate_products_in_supplied_list() {
        let basket = Basket::with_items(customer(), vec![hammer(1), hammer(3)]).unwrap();

        assert_eq!(basket.items().len(), 1);
        assert_eq!(basket.items()[0].quantity, 4);
    }

    #[test]
    fn should_reject_merge_past_max_quantity() {
        let mut basket = Basket::with_items(customer(), vec![hammer(i32::MAX)]).unwrap();

        let result = basket.merge_item(hammer(5));

        assert!(matches!(result.unwrap_err(), BasketError::InvalidQuantity));
        assert_eq!(basket.find_item("p1").unwrap().quantity, i32::MAX);
    }

    #[test]
    fn should_reject_supplied_list_overflowing_a_line() {
        let result = Basket::with_items(customer(), vec![hammer(i32::MAX), hammer(1)]);

        assert!(matches!(result.unwrap_err(), BasketError::InvalidQuantity));
    }

    #[test]
    fn should_increase_quantity() {
        let mut basket = Basket::with_items(customer(), vec![hammer(2)]).unwrap();
        basket.increase_quantity("p1", 3).unwrap();

        assert_eq!(basket.find_item("p1").unwrap().quantity, 5);
        assert_eq!(basket.total_amount(), price("64.95"));
    }

    #[test]
    fn should_reject_non_positive_increase() {
        let mut basket = Basket::with_items(customer(), vec![hammer(2)]).unwrap();

        assert!(matches!(
            basket.increase_quantity("p1", 0).unwrap_err(),
            BasketError::InvalidQuantity
        ));
    }

    #[test]
    fn should_report_missing_item_on_increase() {
        let mut basket = Basket::new(customer());

        assert!(matches!(
            basket.increase_quantity("p1", 1).unwrap_err(),
            BasketError::ItemNotFound
        ));
    }

    #[test]
    fn should_decrease_quantity_without_removing() {
        let mut basket = Basket::with_items(customer(), vec![hammer(5)]).unwrap();
        let removed = basket.decrease_quantity("p1", 2).unwrap();

        assert!(!removed);
        assert_eq!(basket.find_item("p1").unwrap().quantity, 3);
    }

    #[test]
    fn should_remove_line_when_decrease_reaches_zero() {
        let mut basket = Basket::with_items(customer(), vec![hammer(2)]).unwrap();
        let removed = basket.decrease_quantity("p1", 2).unwrap();

        assert!(removed);
        assert!(basket.is_empty());
        assert_eq!(basket.total_amount(), BigDecimal::zero());
    }

    #[test]
    fn should_remove_line_when_decrease_exceeds_quantity() {
        let mut basket = Basket::with_items(customer(), vec![hammer(2)]).unwrap();
        let removed = basket.decrease_quantity("p1", 10).unwrap();

        assert!(removed);
        assert!(basket.find_item("p1").is_none());
    }

    #[test]
    fn should_report_missing_item_on_remove() {
        let mut basket = Basket::with_items(customer(), vec![hammer(2)]).unwrap();

        assert!(matches!(
            basket.remove_item("p2").unwrap_err(),
            BasketError::ItemNotFound
        ));
        assert_eq!(basket.items().len(), 1);
    }

    proptest! {
        #[test]
        fn decrease_never_leaves_non_positive_quantity(
            start in 1..1000i32,
            decrease in 1..2000i32
        ) {
            let mut basket = Basket::with_items(customer(), vec![hammer(start)]).unwrap();
            let removed = basket.decrease_quantity("p1", decrease).unwrap();

            match basket.find_item("p1") {
                Some(item) => {
                    prop_assert!(!removed);
                    prop_assert_eq!(item.quantity, start - decrease);
                    prop_assert!(item.quantity > 0);
                }
                None => {
                    prop_assert!(removed);
                    prop_assert!(decrease >= start);
                }
            }
        }

        #[test]
        fn merged_basket_keeps_product_ids_unique(
            quantities in proptest::collection::vec((0..5usize, 1..50i32), 1..30)
        ) {
            let mut basket = Basket::new(customer());
            for (product, quantity) in &quantities {
                let item = BasketLineItem::new(format!("p{}", product), "Item", price("1.5"), *quantity).unwrap();
                basket.merge_item(item).unwrap();
            }

            let mut ids: Vec<&str> = basket.items().iter().map(|i| i.product_id.as_str()).collect();
            let total_lines = ids.len();
            ids.sort();
            ids.dedup();
            prop_assert_eq!(ids.len(), total_lines);

            let expected_units: i32 = quantities.iter().map(|(_, q)| q).sum();
            let actual_units: i32 = basket.items().iter().map(|i| i.quantity).sum();
            prop_assert_eq!(actual_units, expected_units);
        }
    }
}
