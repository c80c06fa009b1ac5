//! Item domain model.
//!
//! # Responsibility
//! - Define the inventory record stored in the `items` table.
//! - Provide the write-time validation applied by the repository.
//!
//! # Invariants
//! - `id` is assigned by the caller and never reused for another item.
//! - `price` must be a finite number.
//! - Negative `price` and `quantity` are accepted; they are non-negative by
//!   convention only.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier of an inventory item, matching the SQLite rowid.
pub type ItemId = i64;

/// One inventory record.
///
/// Equality is field-wise, so `price` compares with zero tolerance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    /// Unit price. Must be finite.
    pub price: f64,
    pub quantity: i64,
}

/// Validation failure for an item about to be written.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemValidationError {
    NonFinitePrice { id: ItemId, price: f64 },
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonFinitePrice { id, price } => {
                write!(f, "item {id} has non-finite price {price}")
            }
        }
    }
}

impl Error for ItemValidationError {}

impl Item {
    /// Creates an item with a caller-provided id.
    pub fn new(id: ItemId, name: impl Into<String>, price: f64, quantity: i64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            quantity,
        }
    }

    /// Checks the invariants enforced before persistence.
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        if !self.price.is_finite() {
            return Err(ItemValidationError::NonFinitePrice {
                id: self.id,
                price: self.price,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Item, ItemValidationError};

    #[test]
    fn validate_accepts_negative_values() {
        let item = Item::new(7, "refund", -3.5, -1);
        assert!(item.validate().is_ok());
    }

    #[test]
    fn validate_rejects_nan_and_infinite_price() {
        let nan = Item::new(1, "nan", f64::NAN, 1);
        assert!(matches!(
            nan.validate(),
            Err(ItemValidationError::NonFinitePrice { id: 1, .. })
        ));

        let inf = Item::new(2, "inf", f64::INFINITY, 1);
        assert!(inf.validate().is_err());
    }

    #[test]
    fn serializes_with_plain_field_names() {
        let json = serde_json::to_value(Item::new(1, "Apples", 10.0, 20)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "name": "Apples", "price": 10.0, "quantity": 20})
        );
    }
}
