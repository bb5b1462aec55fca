//! Tip Computation Module
//!
//! This module holds the pure core of the calculator:
//!
//! - `TipPercentage`: the closed set of selectable tip rates
//! - `parse_cost`: validation of the cost text as typed by the user
//! - `compute_tip`: cost, rate and round-up preference to a tip amount
//! - `TipCalculator`: `compute_tip` plus an injected currency formatter
//!
//! Nothing here touches the terminal, the environment or any shared state,
//! so every function returns the same value for the same inputs.

use crate::currency::CurrencyFormatter;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TipPercentage {
    #[default]
    Fifteen,
    Eighteen,
    Twenty,
}

impl TipPercentage {
    pub const ALL: [TipPercentage; 3] = [
        TipPercentage::Fifteen,
        TipPercentage::Eighteen,
        TipPercentage::Twenty,
    ];

    pub fn rate(&self) -> Decimal {
        Decimal::new(self.percent().into(), 2)
    }

    pub fn percent(&self) -> u8 {
        match self {
            TipPercentage::Fifteen => 15,
            TipPercentage::Eighteen => 18,
            TipPercentage::Twenty => 20,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TipPercentage::Fifteen => "15%",
            TipPercentage::Eighteen => "18%",
            TipPercentage::Twenty => "20%",
        }
    }

    /// Next option in display order, wrapping from 20% back to 15%.
    pub fn next(&self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous option in display order, wrapping from 15% to 20%.
    pub fn prev(&self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|p| p == self).unwrap_or(0)
    }
}

impl fmt::Display for TipPercentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported tip percentage '{0}', expected one of 15, 18 or 20")]
pub struct ParsePercentageError(String);

impl FromStr for TipPercentage {
    type Err = ParsePercentageError;

    /// Accepts `18`, `18%` and `0.18` style values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
        let value = Decimal::from_str(number).map_err(|_| ParsePercentageError(s.to_string()))?;

        Self::ALL
            .into_iter()
            .find(|p| value == Decimal::from(p.percent()) || value == p.rate())
            .ok_or_else(|| ParsePercentageError(s.to_string()))
    }
}

/// Reasons a cost text does not produce a tip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CostError {
    #[error("no cost entered")]
    Empty,
    #[error("'{0}' is not a decimal amount")]
    Malformed(String),
    #[error("negative cost {0}")]
    Negative(Decimal),
}

/// Parses the cost text typed by the user.
///
/// Surrounding whitespace is ignored. Plain decimals and scientific notation
/// (`1.5e2`) are accepted. Digit separators are not.
pub fn parse_cost(text: &str) -> Result<Decimal, CostError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CostError::Empty);
    }
    // rust_decimal tolerates `1_000`, a user-typed cost should not
    if text.contains('_') {
        return Err(CostError::Malformed(text.to_string()));
    }

    let cost = Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| CostError::Malformed(text.to_string()))?;

    if cost.is_sign_negative() && !cost.is_zero() {
        return Err(CostError::Negative(cost));
    }
    Ok(cost)
}

/// Computes the tip for one press of the Calculate button.
///
/// An empty, malformed, negative or zero cost means no tip is due and yields
/// zero. With `round_up` the tip is raised to the next whole currency unit.
pub fn compute_tip(cost_text: &str, percentage: TipPercentage, round_up: bool) -> Decimal {
    let cost = match parse_cost(cost_text) {
        Ok(cost) => cost,
        Err(err) => {
            tracing::debug!(%err, "no tip due");
            return Decimal::ZERO;
        }
    };

    if cost.is_zero() {
        return Decimal::ZERO;
    }

    let tip = cost * percentage.rate();
    let tip = if round_up { tip.ceil() } else { tip };

    tracing::debug!(%cost, %percentage, round_up, %tip, "tip computed");
    tip
}

/// `compute_tip` bound to a currency formatter.
#[derive(Debug, Clone)]
pub struct TipCalculator<F> {
    formatter: F,
}

impl<F: CurrencyFormatter> TipCalculator<F> {
    pub fn new(formatter: F) -> Self {
        Self { formatter }
    }

    /// Computes and formats the tip for display.
    pub fn calculate(&self, cost_text: &str, percentage: TipPercentage, round_up: bool) -> String {
        self.formatter
            .format(compute_tip(cost_text, percentage, round_up))
    }
}
