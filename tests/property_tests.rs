//! Property tests for calculator invariants.
//!
//! Uses proptest to verify:
//! 1. Execution order is a price-sorted permutation of the input
//! 2. Each scenario's notional is the sum of its prefix, and avg × qty ≈ notional
//! 3. Zero risk always yields zero R/R
//! 4. Validation is permissive on blank ladders

use proptest::prelude::*;
use risk_calculator::calculator::{
    build_partial_scenarios, execution_order, is_stop_loss_valid, is_take_profit_valid,
    risk_reward,
};
use risk_calculator::{Direction, Entry, EntryId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_price() -> impl Strategy<Value = Decimal> {
    (1_000u32..200_000u32).prop_map(|cents| Decimal::new(cents as i64, 2))
}

fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1u32..10_000u32).prop_map(Decimal::from)
}

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Long), Just(Direction::Short)]
}

fn arb_ladder() -> impl Strategy<Value = Vec<Entry>> {
    prop::collection::vec((arb_price(), arb_amount()), 1..8).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (price, amount))| {
                Entry::new(EntryId::new(format!("e{}", i)), price, amount, i as u32)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn execution_order_is_sorted_permutation(
        entries in arb_ladder(),
        direction in arb_direction(),
    ) {
        let ordered = execution_order(&entries, direction);

        let mut input_ids: Vec<_> = entries.iter().map(|e| e.id.clone()).collect();
        let mut output_ids: Vec<_> = ordered.iter().map(|e| e.id.clone()).collect();
        input_ids.sort();
        output_ids.sort();
        prop_assert_eq!(input_ids, output_ids);

        for pair in ordered.windows(2) {
            match direction {
                Direction::Short => prop_assert!(pair[0].price <= pair[1].price),
                Direction::Long => prop_assert!(pair[0].price >= pair[1].price),
            }
        }
    }

    #[test]
    fn scenarios_accumulate_prefixes(
        entries in arb_ladder(),
        direction in arb_direction(),
        stop in arb_price(),
        take in arb_price(),
    ) {
        let ordered = execution_order(&entries, direction);
        let scenarios = build_partial_scenarios(&ordered, direction, stop, take);
        prop_assert_eq!(scenarios.len(), ordered.len());

        for (i, scenario) in scenarios.iter().enumerate() {
            prop_assert_eq!(&scenario.entry_id, &ordered[i].id);

            let m = scenario.metrics.defined().expect("priced ladder is always defined");
            let expected: Decimal = ordered[..=i].iter().map(|e| e.amount).sum();
            prop_assert_eq!(m.total_amount, expected);

            let drift = (m.avg_price * m.total_qty - m.total_amount).abs();
            prop_assert!(drift < dec!(0.000001), "avg * qty drifted by {}", drift);

            // The blend sits inside the prefix's price range
            let lo = ordered[..=i].iter().map(|e| e.price).min().unwrap();
            let hi = ordered[..=i].iter().map(|e| e.price).max().unwrap();
            prop_assert!(m.avg_price >= lo - dec!(0.000001));
            prop_assert!(m.avg_price <= hi + dec!(0.000001));
        }
    }

    #[test]
    fn zero_risk_means_zero_rr(take_pnl in -1_000_000i64..1_000_000i64) {
        prop_assert_eq!(
            risk_reward(Decimal::ZERO, Decimal::new(take_pnl, 2)),
            Some(Decimal::ZERO)
        );
    }

    #[test]
    fn blank_ladders_always_validate(
        count in 0usize..6,
        direction in arb_direction(),
        level in arb_price(),
    ) {
        let blanks: Vec<Entry> = (0..count)
            .map(|i| {
                Entry::new(EntryId::new(format!("b{}", i)), Decimal::ZERO, Decimal::ZERO, i as u32)
            })
            .collect();

        prop_assert!(is_stop_loss_valid(&blanks, direction, level));
        prop_assert!(is_take_profit_valid(&blanks, direction, level));
    }
}
