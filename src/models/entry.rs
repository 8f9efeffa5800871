//! Entry model: one planned order fill contributing to a position.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Opaque entry identifier. Unique within the active entry set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Editable field of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Price,
    Amount,
}

/// A planned entry order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,

    /// Limit price. Zero means "not entered yet".
    pub price: Decimal,

    /// Notional amount in quote currency (USD)
    pub amount: Decimal,

    /// Insertion order, used by `SortOrder::Original`
    pub original_index: u32,
}

impl Entry {
    pub fn new(id: EntryId, price: Decimal, amount: Decimal, original_index: u32) -> Self {
        Self {
            id,
            price,
            amount,
            original_index,
        }
    }

    /// Whether the price has been filled in.
    pub fn is_priced(&self) -> bool {
        self.price > Decimal::ZERO
    }

    /// Base-asset quantity bought or sold by this entry (`amount / price`).
    ///
    /// `None` when the entry has no price yet, or when the quotient does not
    /// fit in a `Decimal`.
    pub fn quantity(&self) -> Option<Decimal> {
        if !self.is_priced() {
            return None;
        }
        self.amount.checked_div(self.price)
    }

    pub fn set(&mut self, field: EntryField, value: Decimal) {
        match field {
            EntryField::Price => self.price = value,
            EntryField::Amount => self.amount = value,
        }
    }
}
