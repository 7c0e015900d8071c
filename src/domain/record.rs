//! Raw outgoing-stock records supplied by the transaction source.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// One outgoing-stock line: an item leaving inventory on a date for a customer.
///
/// Mining only looks at `item_name`, `date` and `customer`; `quantity` is
/// consumed by the demand forecaster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingRecord {
    pub item_name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub customer: String,
    #[serde(default = "default_quantity")]
    pub quantity: Decimal,
}

fn default_quantity() -> Decimal {
    Decimal::ONE
}

impl OutgoingRecord {
    /// Create a new record.
    pub fn new(
        item_name: impl Into<String>,
        date: NaiveDate,
        customer: impl Into<String>,
        quantity: Decimal,
    ) -> Self {
        Self {
            item_name: item_name.into(),
            date,
            customer: customer.into(),
            quantity,
        }
    }

    /// Check that the quantity is not negative.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NegativeQuantity`] naming the item and date.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.quantity < Decimal::ZERO {
            return Err(DomainError::NegativeQuantity {
                item: self.item_name.clone(),
                date: self.date,
                quantity: self.quantity,
            });
        }
        Ok(())
    }
}
