//! One full calculation pass, serializable and printable.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculator::ValidationReport;
use crate::models::{
    Computed, Direction, Entry, EntryId, PartialScenario, PositionSummary, SortOrder,
};

/// Snapshot of inputs and every derived view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationReport {
    pub ticker: String,
    pub direction: Direction,
    pub stop_loss: Decimal,
    pub take_profit: Decimal,
    pub sort_order: SortOrder,

    /// Entries in display order
    pub entries: Vec<Entry>,

    /// Entry IDs in fill order
    pub execution_order: Vec<EntryId>,

    pub scenarios: Vec<PartialScenario>,
    pub summary: Computed<PositionSummary>,
    pub risk_reward_suspicious: bool,
    pub validation: ValidationReport,
}

impl CalculationReport {
    /// 1-based fill position of an entry.
    fn fill_rank(&self, id: &EntryId) -> Option<usize> {
        self.execution_order.iter().position(|e| e == id).map(|i| i + 1)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for CalculationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = format!(" {} {} ", self.ticker, self.direction.label().to_uppercase());
        writeln!(f, "\n{:=^72}", title)?;
        writeln!(f, "Stop-Loss:   {}", self.stop_loss)?;
        writeln!(f, "Take-Profit: {}", self.take_profit)?;

        writeln!(f, "\n--- Entries ({}) ---", self.sort_order)?;
        writeln!(f, "{:>4} {:>14} {:>12} {:>6}  {}", "FILL", "PRICE", "AMOUNT", "OK", "ID")?;
        for entry in &self.entries {
            let rank = self
                .fill_rank(&entry.id)
                .map(|r| r.to_string())
                .unwrap_or_else(|| "-".to_string());
            let ok = if self.validation.invalid_entries.contains(&entry.id) {
                "no"
            } else {
                "yes"
            };
            writeln!(
                f,
                "{:>4} {:>14} {:>12} {:>6}  {}",
                rank,
                price_or_blank(entry.price),
                format!("${:.2}", entry.amount),
                ok,
                entry.id
            )?;
        }

        writeln!(f, "\n--- Partial Fills ---")?;
        writeln!(
            f,
            "{:>4} {:>12} {:>14} {:>10} {:>11} {:>11} {:>8} {:>8} {:>6}",
            "#", "FILLED", "AVG PRICE", "AMOUNT", "P&L STOP", "P&L TAKE", "%STOP", "%TAKE", "R/R"
        )?;
        for (i, scenario) in self.scenarios.iter().enumerate() {
            match &scenario.metrics {
                Computed::Defined(m) => writeln!(
                    f,
                    "{:>4} {:>12} {:>14.2} {:>10} {:>11} {:>11} {:>7.2}% {:>7.2}% {:>6.2}",
                    i + 1,
                    price_or_blank(scenario.entry_price),
                    m.avg_price,
                    format!("${:.2}", m.total_amount),
                    format!("${:.2}", m.pnl_at_stop),
                    format!("${:.2}", m.pnl_at_take),
                    m.percent_to_stop,
                    m.percent_to_take,
                    m.risk_reward
                )?,
                Computed::Undefined(reason) => writeln!(
                    f,
                    "{:>4} {:>12}  undefined: {}",
                    i + 1,
                    price_or_blank(scenario.entry_price),
                    reason
                )?,
            }
        }

        writeln!(f, "\n--- Position ---")?;
        match &self.summary {
            Computed::Defined(s) => {
                writeln!(f, "Avg Price:   {:.2}", s.avg_price)?;
                writeln!(f, "Quantity:    {:.8}", s.total_qty)?;
                writeln!(f, "Notional:    ${:.2}", s.total_amount)?;
                writeln!(f, "Risk:        ${:.2}", s.risk_usd)?;
                writeln!(f, "Reward:      ${:.2}", s.reward_usd)?;
                writeln!(
                    f,
                    "R/R:         {:.2}{}",
                    s.risk_reward,
                    if self.risk_reward_suspicious { "  (suspicious)" } else { "" }
                )?;
            }
            Computed::Undefined(reason) => {
                writeln!(f, "Undefined: {}", reason)?;
            }
        }

        if !self.validation.is_clean() {
            writeln!(f, "\n--- Warnings ---")?;
            if !self.validation.stop_loss_message.is_empty() {
                writeln!(f, "! {}", self.validation.stop_loss_message)?;
            }
            if !self.validation.take_profit_message.is_empty() {
                writeln!(f, "! {}", self.validation.take_profit_message)?;
            }
            for id in &self.validation.invalid_entries {
                writeln!(f, "! Entry {} is outside the stop/take range", id)?;
            }
        }

        writeln!(f, "{:=^72}", "")?;
        Ok(())
    }
}

fn price_or_blank(price: Decimal) -> String {
    if price > Decimal::ZERO {
        price.to_string()
    } else {
        "-".to_string()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::CalculatorConfig;
    use crate::store::{CalculatorState, SequentialGenerator};
    use rust_decimal_macros::dec;

    fn state() -> CalculatorState<SequentialGenerator> {
        let config = CalculatorConfig::default();
        CalculatorState::with_id_generator(&config, SequentialGenerator::default())
    }

    #[test]
    fn test_display_contains_sections() {
        let mut state = state();
        state.set_stop_loss(dec!(92000));

        let text = state.snapshot().to_string();
        assert!(text.contains("BTC SHORT"));
        assert!(text.contains("--- Partial Fills ---"));
        assert!(text.contains("Avg Price:   90497.2"));
        assert!(!text.contains("--- Warnings ---"));
    }

    #[test]
    fn test_display_lists_warnings() {
        let mut state = state();
        state.set_stop_loss(dec!(90500));

        let text = state.snapshot().to_string();
        assert!(text.contains("--- Warnings ---"));
        assert!(text.contains("Stop-loss must be above all entries"));
        assert!(text.contains("Entry e2 is outside"));
    }

    #[test]
    fn test_json_output() {
        let state = state();
        let report = state.snapshot();

        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["direction"], "short");
        assert_eq!(value["summary"]["status"], "defined");
        assert_eq!(value["scenarios"].as_array().unwrap().len(), 2);
    }
}
