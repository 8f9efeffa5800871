//! End-to-end calculator session: edit a ladder the way a user would and
//! check every derived view along the way.

use risk_calculator::{
    CalculatorConfig, CalculatorState, Computed, Direction, EntryField, Locale, SeedEntry,
    SequentialGenerator, SortOrder, UndefinedReason,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn empty_calculator() -> CalculatorState<SequentialGenerator> {
    let config = CalculatorConfig {
        default_entries: Vec::new(),
        ..Default::default()
    };
    CalculatorState::with_id_generator(&config, SequentialGenerator::new("row"))
}

#[test]
fn builds_a_short_ladder_from_scratch() {
    let mut calc = empty_calculator();
    calc.set_direction(Direction::Short);
    calc.set_stop_loss(dec!(92000));
    calc.set_take_profit(dec!(85000));

    assert!(calc.partial_scenarios().is_empty());

    // A new row has no price yet: metrics are undefined, validation is quiet
    let first = calc.add_entry();
    assert_eq!(
        calc.position_summary(),
        Computed::Undefined(UndefinedReason::UnpricedEntry {
            entry_id: first.clone()
        })
    );
    assert!(calc.is_stop_loss_valid());
    assert!(calc.is_take_profit_valid());

    calc.update_entry(&first, EntryField::Price, dec!(91000));
    // Price but no amount yet
    assert_eq!(
        calc.position_summary(),
        Computed::Undefined(UndefinedReason::ZeroQuantity)
    );

    let amount = calc.preset(1).unwrap();
    calc.apply_preset(&first, amount);

    let second = calc.add_entry();
    calc.update_entry(&second, EntryField::Price, dec!(90000));
    calc.update_entry(&second, EntryField::Amount, dec!(100));

    // 90000 fills first for a short
    let order: Vec<_> = calc.execution_order_entries().into_iter().map(|e| e.id).collect();
    assert_eq!(order, vec![second.clone(), first.clone()]);

    let scenarios = calc.partial_scenarios();
    assert_eq!(scenarios.len(), 2);
    assert_eq!(scenarios[0].entry_id, second);
    assert_eq!(scenarios[1].entry_id, first);

    let summary = calc.position_summary().into_defined().unwrap();
    assert_eq!(summary.total_amount, dec!(200));
    assert_eq!(summary.avg_price.round_dp(2), dec!(90497.24));
    assert!(summary.risk_usd > Decimal::ZERO);
    assert!(summary.reward_usd > summary.risk_usd);
    assert!(!calc.is_risk_reward_suspicious());
    assert!(calc.validation_report().is_clean());

    // Display order is insertion order by default
    let display: Vec<_> = calc.sorted_entries().into_iter().map(|e| e.id).collect();
    assert_eq!(display, vec![first.clone(), second.clone()]);
    calc.set_sort_order(SortOrder::Asc);
    assert_eq!(calc.sorted_entries()[0].id, second);
}

#[test]
fn flipping_direction_flags_misplaced_levels() {
    let mut calc = empty_calculator();
    calc.set_locale(Locale::En);
    calc.load_entries(vec![
        SeedEntry {
            price: dec!(90000),
            amount: dec!(100),
        },
        SeedEntry {
            price: dec!(89000),
            amount: dec!(100),
        },
    ]);
    calc.set_stop_loss(dec!(93000));
    calc.set_take_profit(dec!(85000));
    assert!(calc.validation_report().is_clean());

    calc.set_direction(Direction::Long);
    let report = calc.validation_report();
    assert!(!report.stop_loss_valid);
    assert!(!report.take_profit_valid);
    assert_eq!(report.invalid_entries.len(), 2);
    assert!(calc.stop_loss_validation_message().contains("below"));
    assert!(calc.take_profit_validation_message().contains("above"));

    // Long: pnl_at_stop is now a gain, take a loss, but the absolute values
    // still feed R/R
    let summary = calc.position_summary().into_defined().unwrap();
    assert!(summary.risk_usd > Decimal::ZERO);

    calc.set_stop_loss(dec!(88000));
    calc.set_take_profit(dec!(95000));
    assert!(calc.validation_report().is_clean());
}

#[test]
fn removing_entries_keeps_ids_unique() {
    let mut calc = empty_calculator();
    let a = calc.add_entry();
    let b = calc.add_entry();
    calc.remove_entry(&a);
    let c = calc.add_entry();

    assert_ne!(b, c);
    assert_ne!(a, c);
    let indices: Vec<u32> = calc.entries().iter().map(|e| e.original_index).collect();
    assert_eq!(indices, vec![1, 2]);

    // Unknown IDs are ignored
    assert!(!calc.remove_entry(&a));
    assert!(!calc.apply_preset(&a, dec!(100)));
    assert!(calc.is_entry_valid(&a));
    assert!(calc.scenario_for_entry(&a).is_none());
}

#[test]
fn snapshot_renders_and_serializes() {
    let config = CalculatorConfig::default();
    let mut calc = CalculatorState::with_id_generator(&config, SequentialGenerator::default());
    calc.set_stop_loss(dec!(90100));
    calc.set_take_profit(dec!(80000));

    let report = calc.snapshot();
    assert!(report.risk_reward_suspicious);
    assert!(!report.validation.stop_loss_valid);

    let json = report.to_json().unwrap();
    assert!(json.contains("\"risk_reward_suspicious\": true"));
    assert!(report.to_string().contains("(suspicious)"));
}
