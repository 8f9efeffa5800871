//! Full-fill position summary and the risk/reward sanity band.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::models::{Computed, PartialScenario, PositionSummary};

/// Summarize the fully filled position, i.e. the last scenario.
///
/// No scenarios means no entries, which is a defined all-zero summary.
pub fn position_summary(scenarios: &[PartialScenario]) -> Computed<PositionSummary> {
    match scenarios.last() {
        None => Computed::Defined(PositionSummary::zero()),
        Some(last) => last.metrics.clone().map(|m| PositionSummary::from(&m)),
    }
}

/// Band of risk/reward ratios considered plausible. Values outside it
/// usually mean a stop or take was mistyped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskRewardBand {
    pub min: Decimal,
    pub max: Decimal,
}

impl Default for RiskRewardBand {
    fn default() -> Self {
        Self {
            min: dec!(0.2),
            max: dec!(10),
        }
    }
}

impl RiskRewardBand {
    pub fn is_suspicious(&self, risk_reward: Decimal) -> bool {
        risk_reward > self.max || risk_reward < self.min
    }
}

/// Advisory flag for an implausible R/R, using the default band.
pub fn is_risk_reward_suspicious(summary: &PositionSummary) -> bool {
    RiskRewardBand::default().is_suspicious(summary.risk_reward)
}
