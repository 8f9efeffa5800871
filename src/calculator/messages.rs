//! Validation message table, keyed by locale, field and direction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ru,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ru => "ru",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Self::En),
            "ru" | "russian" => Ok(Self::Ru),
            other => Err(format!("unsupported locale '{}', expected en or ru", other)),
        }
    }
}

/// Level that a validation message is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationField {
    StopLoss,
    TakeProfit,
}

/// Advisory text shown when `field` is on the wrong side of the entries.
pub fn message(locale: Locale, field: ValidationField, direction: Direction) -> &'static str {
    use Direction::{Long, Short};
    use ValidationField::{StopLoss, TakeProfit};

    match (locale, field, direction) {
        (Locale::En, StopLoss, Short) => "Stop-loss must be above all entries for a Short position",
        (Locale::En, StopLoss, Long) => "Stop-loss must be below all entries for a Long position",
        (Locale::En, TakeProfit, Short) => {
            "Take-profit must be below all entries for a Short position"
        }
        (Locale::En, TakeProfit, Long) => {
            "Take-profit must be above all entries for a Long position"
        }
        (Locale::Ru, StopLoss, Short) => "Стоп-лосс должен быть выше всех входов для Short позиции",
        (Locale::Ru, StopLoss, Long) => "Стоп-лосс должен быть ниже всех входов для Long позиции",
        (Locale::Ru, TakeProfit, Short) => {
            "Тейк-профит должен быть ниже всех входов для Short позиции"
        }
        (Locale::Ru, TakeProfit, Long) => {
            "Тейк-профит должен быть выше всех входов для Long позиции"
        }
    }
}

/// Empty when `valid`, otherwise the table message.
pub fn validation_message(
    valid: bool,
    locale: Locale,
    field: ValidationField,
    direction: Direction,
) -> &'static str {
    if valid {
        ""
    } else {
        message(locale, field, direction)
    }
}
