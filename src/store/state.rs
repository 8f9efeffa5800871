//! Mutable calculator state and its derived views.
//!
//! The state owns the entries and parameters. Every view recomputes from the
//! current fields through the pure functions in [`crate::calculator`]; nothing
//! is cached between reads.

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::ids::{IdGenerator, UuidGenerator};
use crate::calculator::{self, Locale, RiskRewardBand, ValidationField, ValidationReport};
use crate::config::{CalculatorConfig, SeedEntry};
use crate::models::{
    Computed, Direction, Entry, EntryField, EntryId, PartialScenario, PositionSummary, SortOrder,
};
use crate::report::CalculationReport;

/// The calculator: an entry ladder, its stop/take levels, and display settings.
#[derive(Debug, Clone)]
pub struct CalculatorState<G: IdGenerator = UuidGenerator> {
    ticker: String,
    direction: Direction,
    entries: Vec<Entry>,
    stop_loss: Decimal,
    take_profit: Decimal,
    presets: Vec<Decimal>,
    sort_order: SortOrder,
    risk_reward_band: RiskRewardBand,
    locale: Locale,
    ids: G,
}

impl CalculatorState<UuidGenerator> {
    /// Create a calculator from configuration, with UUID entry IDs.
    pub fn new(config: &CalculatorConfig) -> Self {
        Self::with_id_generator(config, UuidGenerator)
    }
}

impl<G: IdGenerator> CalculatorState<G> {
    /// Create a calculator from configuration with a custom ID source.
    pub fn with_id_generator(config: &CalculatorConfig, ids: G) -> Self {
        let mut state = Self {
            ticker: config.ticker.clone(),
            direction: config.direction,
            entries: Vec::new(),
            stop_loss: config.stop_loss,
            take_profit: config.take_profit,
            presets: config.presets.clone(),
            sort_order: SortOrder::default(),
            risk_reward_band: config.risk_reward_band,
            locale: config.locale,
            ids,
        };
        state.load_entries(config.default_entries.iter().cloned());
        state
    }

    // === Accessors ===

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry(&self, id: &EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    pub fn stop_loss(&self) -> Decimal {
        self.stop_loss
    }

    pub fn take_profit(&self) -> Decimal {
        self.take_profit
    }

    pub fn presets(&self) -> &[Decimal] {
        &self.presets
    }

    /// Preset amount at `index` in the preset list.
    pub fn preset(&self, index: usize) -> Option<Decimal> {
        self.presets.get(index).copied()
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn risk_reward_band(&self) -> RiskRewardBand {
        self.risk_reward_band
    }

    // === Actions ===

    /// Append an empty entry (no price, no amount) and return its ID.
    pub fn add_entry(&mut self) -> EntryId {
        self.push_entry(Decimal::ZERO, Decimal::ZERO)
    }

    /// Replace all entries with `seeds`, assigning fresh IDs in order.
    pub fn load_entries(&mut self, seeds: impl IntoIterator<Item = SeedEntry>) -> Vec<EntryId> {
        self.entries.clear();
        seeds
            .into_iter()
            .map(|seed| self.push_entry(seed.price, seed.amount))
            .collect()
    }

    fn push_entry(&mut self, price: Decimal, amount: Decimal) -> EntryId {
        let original_index = self
            .entries
            .iter()
            .map(|e| e.original_index + 1)
            .max()
            .unwrap_or(0);

        let id = self.ids.next_id();
        debug!(entry_id = %id, original_index, "Entry added");
        self.entries
            .push(Entry::new(id.clone(), price, amount, original_index));
        id
    }

    /// Remove an entry. Returns `false` if no entry has that ID.
    pub fn remove_entry(&mut self, id: &EntryId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| &e.id != id);

        let removed = self.entries.len() < before;
        if removed {
            debug!(entry_id = %id, "Entry removed");
        } else {
            debug!(entry_id = %id, "Remove ignored, unknown entry");
        }
        removed
    }

    /// Set an entry's price or amount. Returns `false` if no entry has that ID.
    pub fn update_entry(&mut self, id: &EntryId, field: EntryField, value: Decimal) -> bool {
        match self.entries.iter_mut().find(|e| &e.id == id) {
            Some(entry) => {
                entry.set(field, value);
                debug!(entry_id = %id, field = ?field, value = %value, "Entry updated");
                true
            }
            None => {
                debug!(entry_id = %id, "Update ignored, unknown entry");
                false
            }
        }
    }

    /// Set an entry's amount to a preset value.
    pub fn apply_preset(&mut self, id: &EntryId, preset_amount: Decimal) -> bool {
        if !self.presets.contains(&preset_amount) {
            warn!(amount = %preset_amount, "Amount is not in the preset list");
        }
        self.update_entry(id, EntryField::Amount, preset_amount)
    }

    pub fn set_sort_order(&mut self, sort_order: SortOrder) {
        self.sort_order = sort_order;
    }

    pub fn set_direction(&mut self, direction: Direction) {
        if direction != self.direction {
            info!(from = %self.direction, to = %direction, "Direction changed");
        }
        self.direction = direction;
    }

    pub fn set_stop_loss(&mut self, stop_loss: Decimal) {
        self.stop_loss = stop_loss;
    }

    pub fn set_take_profit(&mut self, take_profit: Decimal) {
        self.take_profit = take_profit;
    }

    pub fn set_ticker(&mut self, ticker: impl Into<String>) {
        self.ticker = ticker.into();
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    // === Derived views ===

    pub fn sorted_entries(&self) -> Vec<Entry> {
        calculator::display_order(&self.entries, self.sort_order)
    }

    pub fn execution_order_entries(&self) -> Vec<Entry> {
        calculator::execution_order(&self.entries, self.direction)
    }

    pub fn partial_scenarios(&self) -> Vec<PartialScenario> {
        calculator::build_partial_scenarios(
            &self.execution_order_entries(),
            self.direction,
            self.stop_loss,
            self.take_profit,
        )
    }

    pub fn scenario_for_entry(&self, id: &EntryId) -> Option<PartialScenario> {
        calculator::scenario_for_entry(&self.partial_scenarios(), id).cloned()
    }

    pub fn position_summary(&self) -> Computed<PositionSummary> {
        calculator::position_summary(&self.partial_scenarios())
    }

    /// Undefined summaries are never flagged.
    pub fn is_risk_reward_suspicious(&self) -> bool {
        self.position_summary()
            .defined()
            .is_some_and(|s| self.risk_reward_band.is_suspicious(s.risk_reward))
    }

    pub fn is_stop_loss_valid(&self) -> bool {
        calculator::is_stop_loss_valid(&self.entries, self.direction, self.stop_loss)
    }

    pub fn is_take_profit_valid(&self) -> bool {
        calculator::is_take_profit_valid(&self.entries, self.direction, self.take_profit)
    }

    /// Unknown IDs are treated as valid.
    pub fn is_entry_valid(&self, id: &EntryId) -> bool {
        self.entry(id).map_or(true, |e| {
            calculator::is_entry_valid(e, self.direction, self.stop_loss, self.take_profit)
        })
    }

    pub fn stop_loss_validation_message(&self) -> &'static str {
        calculator::validation_message(
            self.is_stop_loss_valid(),
            self.locale,
            ValidationField::StopLoss,
            self.direction,
        )
    }

    pub fn take_profit_validation_message(&self) -> &'static str {
        calculator::validation_message(
            self.is_take_profit_valid(),
            self.locale,
            ValidationField::TakeProfit,
            self.direction,
        )
    }

    pub fn validation_report(&self) -> ValidationReport {
        ValidationReport::build(
            &self.entries,
            self.direction,
            self.stop_loss,
            self.take_profit,
            self.locale,
        )
    }

    /// Every view of the current state, computed in one pass.
    pub fn snapshot(&self) -> CalculationReport {
        let execution_order = self.execution_order_entries();
        let scenarios = calculator::build_partial_scenarios(
            &execution_order,
            self.direction,
            self.stop_loss,
            self.take_profit,
        );
        let summary = calculator::position_summary(&scenarios);
        let risk_reward_suspicious = summary
            .defined()
            .is_some_and(|s| self.risk_reward_band.is_suspicious(s.risk_reward));

        CalculationReport {
            ticker: self.ticker.clone(),
            direction: self.direction,
            stop_loss: self.stop_loss,
            take_profit: self.take_profit,
            sort_order: self.sort_order,
            entries: self.sorted_entries(),
            execution_order: execution_order.into_iter().map(|e| e.id).collect(),
            scenarios,
            summary,
            risk_reward_suspicious,
            validation: self.validation_report(),
        }
    }
}
