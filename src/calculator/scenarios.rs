//! Partial-fill scenario builder.
//!
//! For execution-ordered entries `e[0..n]`, scenario `i` describes the
//! position after `e[0..=i]` have filled:
//!
//! ```text
//! qty_k      = amount_k / price_k
//! total_qty  = Σ qty_k
//! avg_price  = Σ amount_k / total_qty
//! ```
//!
//! P&L signs are flipped for shorts so that a correctly placed stop always
//! yields a negative `pnl_at_stop` and a correctly placed take a positive
//! `pnl_at_take`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::models::{
    Computed, Direction, Entry, EntryId, FillMetrics, PartialScenario, UndefinedReason,
};

/// Build one scenario per prefix of `ordered` (which must already be in
/// execution order).
///
/// An entry without a price makes its own scenario and every later one
/// undefined, since the blended quantity can no longer be known. The same
/// holds for an entry whose quantity falls outside the decimal range.
pub fn build_partial_scenarios(
    ordered: &[Entry],
    direction: Direction,
    stop_loss: Decimal,
    take_profit: Decimal,
) -> Vec<PartialScenario> {
    let mut scenarios = Vec::with_capacity(ordered.len());

    let mut totals = Some((Decimal::ZERO, Decimal::ZERO));
    let mut broken: Option<UndefinedReason> = None;

    for entry in ordered {
        if broken.is_none() {
            if !entry.is_priced() {
                debug!(entry_id = %entry.id, "Unpriced entry, later scenarios undefined");
                broken = Some(UndefinedReason::UnpricedEntry {
                    entry_id: entry.id.clone(),
                });
            } else {
                totals = totals.and_then(|(qty, amount)| accumulate(entry, qty, amount));
                if totals.is_none() {
                    debug!(entry_id = %entry.id, "Entry quantity out of range");
                    broken = Some(UndefinedReason::OutOfRange);
                }
            }
        }

        let metrics = match (&broken, totals) {
            (None, Some((total_qty, total_amount))) => {
                fill_metrics(total_qty, total_amount, direction, stop_loss, take_profit)
            }
            (Some(reason), _) => Computed::Undefined(reason.clone()),
            (None, None) => Computed::Undefined(UndefinedReason::OutOfRange),
        };

        scenarios.push(PartialScenario {
            entry_id: entry.id.clone(),
            entry_price: entry.price,
            metrics,
        });
    }

    scenarios
}

/// Add a priced entry to running totals. `None` when its quantity is not
/// representable, including a nonzero amount whose quantity rounds to zero.
fn accumulate(entry: &Entry, qty: Decimal, amount: Decimal) -> Option<(Decimal, Decimal)> {
    let entry_qty = entry.quantity()?;
    if entry_qty.is_zero() && !entry.amount.is_zero() {
        return None;
    }
    Some((qty.checked_add(entry_qty)?, amount.checked_add(entry.amount)?))
}

/// Blend a filled quantity/notional pair against the stop and take levels.
pub fn fill_metrics(
    total_qty: Decimal,
    total_amount: Decimal,
    direction: Direction,
    stop_loss: Decimal,
    take_profit: Decimal,
) -> Computed<FillMetrics> {
    if total_qty.is_zero() {
        return Computed::Undefined(UndefinedReason::ZeroQuantity);
    }

    let Some(avg_price) = total_amount.checked_div(total_qty) else {
        return Computed::Undefined(UndefinedReason::OutOfRange);
    };
    if avg_price.is_zero() {
        return Computed::Undefined(UndefinedReason::ZeroQuantity);
    }

    match blend(avg_price, total_qty, total_amount, direction, stop_loss, take_profit) {
        Some(metrics) => Computed::Defined(metrics),
        None => {
            debug!(avg_price = %avg_price, "Fill metrics out of range");
            Computed::Undefined(UndefinedReason::OutOfRange)
        }
    }
}

fn blend(
    avg_price: Decimal,
    total_qty: Decimal,
    total_amount: Decimal,
    direction: Direction,
    stop_loss: Decimal,
    take_profit: Decimal,
) -> Option<FillMetrics> {
    // Long gains when price rises, short when it falls
    let (stop_move, take_move) = match direction {
        Direction::Long => (
            stop_loss.checked_sub(avg_price)?,
            take_profit.checked_sub(avg_price)?,
        ),
        Direction::Short => (
            avg_price.checked_sub(stop_loss)?,
            avg_price.checked_sub(take_profit)?,
        ),
    };

    let pnl_at_stop = stop_move.checked_mul(total_qty)?;
    let pnl_at_take = take_move.checked_mul(total_qty)?;
    let percent_to_stop = (-stop_move).checked_div(avg_price)?.checked_mul(dec!(100))?;
    let percent_to_take = take_move.checked_div(avg_price)?.checked_mul(dec!(100))?;

    Some(FillMetrics {
        avg_price,
        total_qty,
        total_amount,
        pnl_at_stop,
        pnl_at_take,
        percent_to_stop,
        percent_to_take,
        risk_reward: risk_reward(pnl_at_stop, pnl_at_take)?,
    })
}

/// `|take P&L| / |stop P&L|`, zero when there is nothing at risk.
///
/// `None` when the ratio does not fit in a `Decimal`.
pub fn risk_reward(pnl_at_stop: Decimal, pnl_at_take: Decimal) -> Option<Decimal> {
    let risk = pnl_at_stop.abs();
    if risk > Decimal::ZERO {
        pnl_at_take.abs().checked_div(risk)
    } else {
        Some(Decimal::ZERO)
    }
}

/// The scenario in which `entry_id` is the newly filled entry.
pub fn scenario_for_entry<'a>(
    scenarios: &'a [PartialScenario],
    entry_id: &EntryId,
) -> Option<&'a PartialScenario> {
    scenarios.iter().find(|s| &s.entry_id == entry_id)
}
