//! Pure calculation core: ordering, partial-fill scenarios, summary and
//! placement validation.

mod messages;
mod ordering;
mod scenarios;
mod summary;
mod validation;

pub use messages::{message, validation_message, Locale, ValidationField};
pub use ordering::{display_order, execution_order};
pub use scenarios::{build_partial_scenarios, fill_metrics, risk_reward, scenario_for_entry};
pub use summary::{is_risk_reward_suspicious, position_summary, RiskRewardBand};
pub use validation::{is_entry_valid, is_stop_loss_valid, is_take_profit_valid, ValidationReport};
