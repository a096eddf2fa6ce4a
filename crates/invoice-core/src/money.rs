//! # Money Module
//!
//! Provides the `Money` type used for every amount the user *sees*.
//!
//! ## Exact Inside, Rounded Outside
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WHERE ROUNDING HAPPENS                                                 │
//! │                                                                         │
//! │  quantity × price × (1 + tax/100)   ← Decimal, never rounded            │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  Σ over all rows                    ← Decimal, never rounded            │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  Money::from_decimal(total)         ← rounded to cents HERE ONLY        │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  "$1,234.56"                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use invoice_core::money::Money;
//! use rust_decimal::Decimal;
//!
//! let price = Money::from_cents(123456);
//! assert_eq!(price.to_string(), "$1,234.56");
//!
//! // Half a cent rounds away from zero
//! let tax = Money::from_decimal(Decimal::new(8125, 3)); // 8.125
//! assert_eq!(tax.cents(), 813);
//! ```

use rust_decimal::prelude::{Decimal, RoundingStrategy, ToPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Rounding applied when a Decimal becomes displayable money.
const DISPLAY_ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

// =============================================================================
// Money Type
// =============================================================================

/// A displayable monetary value in cents.
///
/// - **i64 (signed)**: a large discount can push the grand total below zero
/// - **Single field tuple struct**: zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Rounds an exact amount to the nearest cent (half away from zero).
    ///
    /// Amounts beyond the i64 cent range saturate.
    pub fn from_decimal(amount: Decimal) -> Self {
        let saturated = Money(if amount.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        });
        amount
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.round_dp_with_strategy(0, DISPLAY_ROUNDING).to_i64())
            .map(Money)
            .unwrap_or(saturated)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Formats with the default `$` symbol: `$1,234.56`, `-$5.00`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&CurrencyFormat::default().format(*self))
    }
}

// =============================================================================
// Currency Formatting
// =============================================================================

/// How money is rendered in the summary and the preview.
///
/// Only the symbol is configurable; grouping is always `,` every three
/// digits and the fraction always two digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CurrencyFormat {
    pub symbol: String,
}

impl CurrencyFormat {
    /// Creates a format with the given symbol.
    pub fn new(symbol: impl Into<String>) -> Self {
        CurrencyFormat {
            symbol: symbol.into(),
        }
    }

    /// Formats a money value.
    ///
    /// ## Example
    /// ```rust
    /// use invoice_core::money::{CurrencyFormat, Money};
    ///
    /// let eur = CurrencyFormat::new("€");
    /// assert_eq!(eur.format(Money::from_cents(100_000_050)), "€1,000,000.50");
    /// assert_eq!(eur.format(Money::from_cents(-500)), "-€5.00");
    /// ```
    pub fn format(&self, money: Money) -> String {
        let cents = money.cents().unsigned_abs();
        let whole = group_thousands(cents / 100);
        let frac = cents % 100;
        let sign = if money.is_negative() { "-" } else { "" };
        format!("{}{}{}.{:02}", sign, self.symbol, whole, frac)
    }

    /// Rounds and formats an exact amount.
    pub fn format_decimal(&self, amount: Decimal) -> String {
        self.format(Money::from_decimal(amount))
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat::new("$")
    }
}

/// `1234567` → `"1,234,567"`.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

// =============================================================================
// Unit Tests
// =============================================================================
