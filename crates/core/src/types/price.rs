//! Unit prices and money formatting.
//!
//! Product prices are whole currency units derived from the source's base
//! experience at catalog load time. Aggregates (line totals, cart totals) are
//! computed with `rust_decimal` so display rounding never drifts.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Base experience assumed when the source record has none.
pub const DEFAULT_BASE_EXPERIENCE: u32 = 100;

/// A non-negative unit price in whole currency units.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u32);

impl Price {
    /// Create a price from a whole amount.
    #[must_use]
    pub const fn new(amount: u32) -> Self {
        Self(amount)
    }

    /// Derive a price from a base experience value.
    ///
    /// The value is rounded down to the nearest ten. A missing or zero value
    /// falls back to [`DEFAULT_BASE_EXPERIENCE`], so the default price is 100.
    #[must_use]
    pub const fn from_base_experience(base_experience: Option<u32>) -> Self {
        let base = match base_experience {
            Some(value) if value > 0 => value,
            _ => DEFAULT_BASE_EXPERIENCE,
        };
        Self(base / 10 * 10)
    }

    /// Get the whole amount.
    #[must_use]
    pub const fn amount(self) -> u32 {
        self.0
    }

    /// Get the amount as a decimal.
    #[must_use]
    pub fn to_decimal(self) -> Decimal {
        Decimal::from(self.0)
    }

    /// Price of `quantity` units.
    #[must_use]
    pub fn times(self, quantity: u32) -> Decimal {
        Decimal::from(u64::from(self.0) * u64::from(quantity))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// Format a decimal amount with two decimal places, e.g. `"$130.00"`.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    format!("${}", two_places(amount))
}

/// Round to two decimal places and pad the scale, e.g. `130` becomes `130.00`.
#[must_use]
pub fn two_places(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}
