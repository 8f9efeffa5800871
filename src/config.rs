//! Calculator configuration.

use std::collections::HashMap;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculator::{Locale, RiskRewardBand};
use crate::models::Direction;

/// An entry loaded into a fresh calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedEntry {
    pub price: Decimal,
    pub amount: Decimal,
}

/// Starting parameters and static tables for the calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Instrument label, display only
    pub ticker: String,

    /// Initial position direction
    pub direction: Direction,

    /// Initial stop-loss price
    pub stop_loss: Decimal,

    /// Initial take-profit price
    pub take_profit: Decimal,

    /// Quick-fill notional amounts, in display order
    pub presets: Vec<Decimal>,

    /// R/R ratios outside this band are flagged as suspicious
    pub risk_reward_band: RiskRewardBand,

    /// Language of validation messages
    pub locale: Locale,

    /// Entries present when the calculator starts
    pub default_entries: Vec<SeedEntry>,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            ticker: "BTC".to_string(),
            direction: Direction::Short,
            stop_loss: dec!(93000),
            take_profit: dec!(85000),
            presets: vec![dec!(50), dec!(100), dec!(200), dec!(500), dec!(1000)],
            risk_reward_band: RiskRewardBand::default(),
            locale: Locale::En,
            default_entries: vec![
                SeedEntry {
                    price: dec!(90000),
                    amount: dec!(100),
                },
                SeedEntry {
                    price: dec!(91000),
                    amount: dec!(100),
                },
            ],
        }
    }
}

impl CalculatorConfig {
    /// Defaults overridden by `RISKCALC_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(ticker) = env_map.get("RISKCALC_TICKER") {
            config.ticker = ticker.trim().to_uppercase();
        }
        if let Some(raw) = env_map.get("RISKCALC_DIRECTION") {
            config.direction = parse_var("RISKCALC_DIRECTION", raw)?;
        }
        if let Some(raw) = env_map.get("RISKCALC_STOP_LOSS") {
            config.stop_loss = parse_decimal("RISKCALC_STOP_LOSS", raw)?;
        }
        if let Some(raw) = env_map.get("RISKCALC_TAKE_PROFIT") {
            config.take_profit = parse_decimal("RISKCALC_TAKE_PROFIT", raw)?;
        }
        if let Some(raw) = env_map.get("RISKCALC_PRESETS") {
            config.presets = parse_presets(raw)?;
        }
        if let Some(raw) = env_map.get("RISKCALC_RR_MIN") {
            config.risk_reward_band.min = parse_decimal("RISKCALC_RR_MIN", raw)?;
        }
        if let Some(raw) = env_map.get("RISKCALC_RR_MAX") {
            config.risk_reward_band.max = parse_decimal("RISKCALC_RR_MAX", raw)?;
        }
        if let Some(raw) = env_map.get("RISKCALC_LOCALE") {
            config.locale = parse_var("RISKCALC_LOCALE", raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let band = &self.risk_reward_band;
        if band.min > band.max {
            bail!(
                "Invalid risk/reward band: min {} is greater than max {}",
                band.min,
                band.max
            );
        }
        if let Some(p) = self.presets.iter().find(|p| p.is_sign_negative()) {
            bail!("Invalid preset amount {}: must not be negative", p);
        }
        Ok(())
    }
}

fn parse_var<T>(name: &str, raw: &str) -> Result<T>
where
    T: FromStr<Err = String>,
{
    raw.parse::<T>()
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("Invalid value for {}", name))
}

fn parse_decimal(name: &str, raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw.trim()).with_context(|| format!("Invalid value for {}: '{}'", name, raw))
}

fn parse_presets(raw: &str) -> Result<Vec<Decimal>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| parse_decimal("RISKCALC_PRESETS", s))
        .collect()
}
