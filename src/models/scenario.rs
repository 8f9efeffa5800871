//! Derived fill scenarios and the summary of a fully filled position.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EntryId;

/// Why a set of metrics could not be computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum UndefinedReason {
    /// An included entry has no price, so its quantity is unknown.
    UnpricedEntry { entry_id: EntryId },
    /// The filled quantity sums to zero.
    ZeroQuantity,
    /// A quantity, P&L or ratio does not fit in a `Decimal`.
    OutOfRange,
}

impl fmt::Display for UndefinedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UndefinedReason::UnpricedEntry { entry_id } => {
                write!(f, "entry {} has no price", entry_id)
            }
            UndefinedReason::ZeroQuantity => f.write_str("no quantity filled"),
            UndefinedReason::OutOfRange => f.write_str("value outside the representable range"),
        }
    }
}

/// A derived value that is either computable or explicitly undefined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Computed<T> {
    Defined(T),
    Undefined(UndefinedReason),
}

impl<T> Computed<T> {
    pub fn is_defined(&self) -> bool {
        matches!(self, Computed::Defined(_))
    }

    pub fn defined(&self) -> Option<&T> {
        match self {
            Computed::Defined(value) => Some(value),
            Computed::Undefined(_) => None,
        }
    }

    pub fn into_defined(self) -> Option<T> {
        match self {
            Computed::Defined(value) => Some(value),
            Computed::Undefined(_) => None,
        }
    }

    pub fn undefined_reason(&self) -> Option<&UndefinedReason> {
        match self {
            Computed::Defined(_) => None,
            Computed::Undefined(reason) => Some(reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Computed<U> {
        match self {
            Computed::Defined(value) => Computed::Defined(f(value)),
            Computed::Undefined(reason) => Computed::Undefined(reason),
        }
    }
}

/// Blended metrics for a set of filled entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillMetrics {
    /// Notional-weighted average entry price (`total_amount / total_qty`)
    pub avg_price: Decimal,

    /// Base-asset quantity
    pub total_qty: Decimal,

    /// Notional in quote currency
    pub total_amount: Decimal,

    /// P&L if the stop-loss is hit. Negative under a correctly placed stop.
    pub pnl_at_stop: Decimal,

    /// P&L if the take-profit is hit. Positive under a correctly placed take.
    pub pnl_at_take: Decimal,

    /// Distance from average price to the stop, percent of average price
    pub percent_to_stop: Decimal,

    /// Distance from average price to the take, percent of average price
    pub percent_to_take: Decimal,

    /// `reward / risk`, or zero when there is no risk
    pub risk_reward: Decimal,
}

impl FillMetrics {
    pub fn risk_usd(&self) -> Decimal {
        self.pnl_at_stop.abs()
    }

    pub fn reward_usd(&self) -> Decimal {
        self.pnl_at_take.abs()
    }
}

/// Projected position assuming only a prefix of the execution-ordered
/// entries has filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartialScenario {
    /// The entry that newly filled in this prefix
    pub entry_id: EntryId,

    /// Price of that entry
    pub entry_price: Decimal,

    pub metrics: Computed<FillMetrics>,
}

/// Aggregate view of the fully filled position.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PositionSummary {
    pub total_qty: Decimal,
    pub total_amount: Decimal,
    pub avg_price: Decimal,
    pub risk_usd: Decimal,
    pub reward_usd: Decimal,
    pub risk_reward: Decimal,
}

impl PositionSummary {
    /// Summary of a position with no entries.
    pub fn zero() -> Self {
        Self::default()
    }
}

impl From<&FillMetrics> for PositionSummary {
    fn from(m: &FillMetrics) -> Self {
        Self {
            total_qty: m.total_qty,
            total_amount: m.total_amount,
            avg_price: m.avg_price,
            risk_usd: m.risk_usd(),
            reward_usd: m.reward_usd(),
            risk_reward: m.risk_reward,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_computed_accessors() {
        let defined: Computed<u32> = Computed::Defined(7);
        assert!(defined.is_defined());
        assert_eq!(defined.defined(), Some(&7));
        assert_eq!(defined.map(|v| v * 2).into_defined(), Some(14));

        let undefined: Computed<u32> = Computed::Undefined(UndefinedReason::ZeroQuantity);
        assert!(!undefined.is_defined());
        assert_eq!(undefined.undefined_reason(), Some(&UndefinedReason::ZeroQuantity));
        assert_eq!(undefined.into_defined(), None);
    }

    #[test]
    fn test_summary_from_metrics() {
        let metrics = FillMetrics {
            avg_price: dec!(90000),
            total_qty: dec!(0.001),
            total_amount: dec!(90),
            pnl_at_stop: dec!(-2),
            pnl_at_take: dec!(5),
            percent_to_stop: dec!(2.2),
            percent_to_take: dec!(5.5),
            risk_reward: dec!(2.5),
        };

        let summary = PositionSummary::from(&metrics);
        assert_eq!(summary.risk_usd, dec!(2));
        assert_eq!(summary.reward_usd, dec!(5));
        assert_eq!(summary.risk_reward, dec!(2.5));
        assert_eq!(summary.avg_price, dec!(90000));
    }

    #[test]
    fn test_undefined_serializes_with_reason() {
        let value: Computed<PositionSummary> = Computed::Undefined(UndefinedReason::UnpricedEntry {
            entry_id: EntryId::new("e1"),
        });
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json["status"], "undefined");
        assert_eq!(json["value"]["reason"], "unpriced_entry");
        assert_eq!(json["value"]["entry_id"], "e1");
    }
}
