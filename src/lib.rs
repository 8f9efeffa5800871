//! Position-sizing and risk calculator for laddered entries.
//!
//! Given entry orders, a direction, a stop-loss and a take-profit, derives
//! the blended entry price, size, P&L at both levels, risk/reward, and the
//! same metrics for every partial fill of the ladder.

pub mod calculator;
pub mod config;
pub mod models;
pub mod report;
pub mod store;

pub use calculator::{Locale, RiskRewardBand, ValidationReport};
pub use config::{CalculatorConfig, SeedEntry};
pub use models::{
    Computed, Direction, Entry, EntryField, EntryId, FillMetrics, PartialScenario,
    PositionSummary, SortOrder, UndefinedReason,
};
pub use report::CalculationReport;
pub use store::{CalculatorState, IdGenerator, SequentialGenerator, UuidGenerator};
