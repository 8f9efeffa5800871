//! Stop/take placement checks against the entry ladder.
//!
//! All checks are advisory. Entries without a price are ignored, and a
//! ladder with no priced entries is always valid.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::messages::{validation_message, Locale, ValidationField};
use crate::models::{Direction, Entry, EntryId};

/// Lowest and highest priced entry, or `None` if nothing is priced.
fn priced_bounds(entries: &[Entry]) -> Option<(Decimal, Decimal)> {
    entries
        .iter()
        .filter(|e| e.is_priced())
        .map(|e| e.price)
        .fold(None, |bounds, price| match bounds {
            None => Some((price, price)),
            Some((lo, hi)) => Some((lo.min(price), hi.max(price))),
        })
}

/// Short: stop strictly above every entry. Long: strictly below.
pub fn is_stop_loss_valid(entries: &[Entry], direction: Direction, stop_loss: Decimal) -> bool {
    let Some((lowest, highest)) = priced_bounds(entries) else {
        return true;
    };

    match direction {
        Direction::Short => stop_loss > highest,
        Direction::Long => stop_loss < lowest,
    }
}

/// Short: take strictly below every entry. Long: strictly above.
pub fn is_take_profit_valid(entries: &[Entry], direction: Direction, take_profit: Decimal) -> bool {
    let Some((lowest, highest)) = priced_bounds(entries) else {
        return true;
    };

    match direction {
        Direction::Short => take_profit < lowest,
        Direction::Long => take_profit > highest,
    }
}

/// Whether a single entry sits strictly between the stop and the take.
pub fn is_entry_valid(
    entry: &Entry,
    direction: Direction,
    stop_loss: Decimal,
    take_profit: Decimal,
) -> bool {
    if !entry.is_priced() {
        return true;
    }

    match direction {
        Direction::Short => entry.price > take_profit && entry.price < stop_loss,
        Direction::Long => entry.price > stop_loss && entry.price < take_profit,
    }
}

/// Every validation outcome for one snapshot of the calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub stop_loss_valid: bool,
    pub take_profit_valid: bool,
    /// Entries outside the stop/take corridor
    pub invalid_entries: Vec<EntryId>,
    pub stop_loss_message: String,
    pub take_profit_message: String,
}

impl ValidationReport {
    pub fn build(
        entries: &[Entry],
        direction: Direction,
        stop_loss: Decimal,
        take_profit: Decimal,
        locale: Locale,
    ) -> Self {
        let stop_loss_valid = is_stop_loss_valid(entries, direction, stop_loss);
        let take_profit_valid = is_take_profit_valid(entries, direction, take_profit);

        let invalid_entries: Vec<EntryId> = entries
            .iter()
            .filter(|e| !is_entry_valid(e, direction, stop_loss, take_profit))
            .map(|e| e.id.clone())
            .collect();

        if !stop_loss_valid || !take_profit_valid || !invalid_entries.is_empty() {
            debug!(
                direction = %direction,
                stop_loss = %stop_loss,
                take_profit = %take_profit,
                stop_loss_valid,
                take_profit_valid,
                invalid_entries = invalid_entries.len(),
                "Placement check failed"
            );
        }

        Self {
            stop_loss_valid,
            take_profit_valid,
            invalid_entries,
            stop_loss_message: validation_message(
                stop_loss_valid,
                locale,
                ValidationField::StopLoss,
                direction,
            )
            .to_string(),
            take_profit_message: validation_message(
                take_profit_valid,
                locale,
                ValidationField::TakeProfit,
                direction,
            )
            .to_string(),
        }
    }

    /// No warnings of any kind.
    pub fn is_clean(&self) -> bool {
        self.stop_loss_valid && self.take_profit_valid && self.invalid_entries.is_empty()
    }
}
