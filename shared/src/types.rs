//! Common types used across the application

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::PaymentMethod;

/// Error parsing a filter selector
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("invalid month '{0}', expected YYYY-MM or 'all'")]
    InvalidMonth(String),

    #[error("invalid payment method '{0}', expected Efectivo, Yape, Plin or 'all'")]
    InvalidPayment(String),
}

fn is_wildcard(s: &str) -> bool {
    let s = s.trim();
    s.is_empty() || s == "*" || s.eq_ignore_ascii_case("all")
}

/// Month filter: one calendar month or every month
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MonthSelector {
    #[default]
    All,
    Month { year: i32, month: u32 },
}

impl MonthSelector {
    pub fn of(date: NaiveDate) -> Self {
        MonthSelector::Month {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Whether a date falls within the selected month
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            MonthSelector::All => true,
            MonthSelector::Month { year, month } => date.year() == *year && date.month() == *month,
        }
    }
}

impl fmt::Display for MonthSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthSelector::All => f.write_str("all"),
            MonthSelector::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
        }
    }
}

impl FromStr for MonthSelector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_wildcard(s) {
            return Ok(MonthSelector::All);
        }

        let invalid = || SelectorError::InvalidMonth(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        if !year.chars().chain(month.chars()).all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }

        Ok(MonthSelector::Month { year, month })
    }
}

/// Payment method filter
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentSelector {
    #[default]
    All,
    Only(PaymentMethod),
}

impl PaymentSelector {
    pub fn matches(&self, method: PaymentMethod) -> bool {
        match self {
            PaymentSelector::All => true,
            PaymentSelector::Only(selected) => *selected == method,
        }
    }
}

impl fmt::Display for PaymentSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentSelector::All => f.write_str("all"),
            PaymentSelector::Only(method) => write!(f, "{}", method),
        }
    }
}

impl FromStr for PaymentSelector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_wildcard(s) {
            return Ok(PaymentSelector::All);
        }
        s.parse::<PaymentMethod>()
            .map(PaymentSelector::Only)
            .map_err(|_| SelectorError::InvalidPayment(s.to_string()))
    }
}

/// Fixed-point text with `places` decimals, rounding half away from zero
pub fn to_fixed(value: Decimal, places: u32) -> String {
    let rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", places as usize, rounded)
}

/// Format an amount in Soles, e.g. `S/ 50.00`
pub fn format_soles(amount: Decimal) -> String {
    format!("S/ {}", to_fixed(amount, 2))
}

/// Format a percentage with one decimal, e.g. `64.3%`
pub fn format_percent(value: Decimal) -> String {
    format!("{}%", to_fixed(value, 1))
}
