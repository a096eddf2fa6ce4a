//! # Totals Engine
//!
//! Line-item and aggregate totals.
//!
//! ## Formulas
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  per row      line_subtotal = quantity × unit_price                     │
//! │               line_tax      = line_subtotal × tax% / 100                │
//! │               line_total    = line_subtotal + line_tax                  │
//! │                                                                         │
//! │  invoice      subtotal      = Σ line_subtotal                           │
//! │               total_tax     = Σ line_tax                                │
//! │               grand_total   = subtotal + total_tax − discount           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sums are exact. Rounding happens once, when a value becomes [`Money`](crate::money::Money),
//! so a displayed grand total never carries per-row rounding drift.
//!
//! Every product and sum saturates at the Decimal bounds instead of
//! overflowing, so no form input can abort a recompute.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::input::non_negative;
use crate::money::CurrencyFormat;
use crate::types::LineItem;

// =============================================================================
// Line Totals
// =============================================================================

/// `quantity × unit_price × (1 + tax_rate_percent / 100)`.
///
/// Negative inputs contribute zero. Results beyond the Decimal range
/// saturate at [`Decimal::MAX`].
///
/// ## Example
/// ```rust
/// use invoice_core::totals::compute_line_total;
/// use rust_decimal::Decimal;
///
/// let total = compute_line_total(Decimal::from(2), Decimal::from(50), Decimal::from(10));
/// assert_eq!(total, Decimal::from(110));
/// ```
pub fn compute_line_total(quantity: Decimal, unit_price: Decimal, tax_rate_percent: Decimal) -> Decimal {
    let subtotal = non_negative(quantity).saturating_mul(non_negative(unit_price));
    subtotal.saturating_add(percent_of(subtotal, non_negative(tax_rate_percent)))
}

/// `amount × percent / 100`, saturating.
fn percent_of(amount: Decimal, percent: Decimal) -> Decimal {
    // Divide first when the product overflows
    match amount.checked_mul(percent) {
        Some(product) => product / Decimal::ONE_HUNDRED,
        None => (amount / Decimal::ONE_HUNDRED).saturating_mul(percent),
    }
}

impl LineItem {
    /// Quantity × unit price.
    pub fn subtotal(&self) -> Decimal {
        self.quantity.saturating_mul(self.unit_price)
    }

    /// Tax on this row at the row's own rate.
    pub fn tax(&self) -> Decimal {
        percent_of(self.subtotal(), self.tax_rate.percent())
    }

    /// Subtotal plus tax.
    pub fn total(&self) -> Decimal {
        compute_line_total(self.quantity, self.unit_price, self.tax_rate.percent())
    }
}

// =============================================================================
// Aggregate Totals
// =============================================================================

/// Derived totals for the whole invoice. Never stored on its own: always
/// recomputed from the rows and the discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Totals {
    #[ts(as = "String")]
    pub subtotal: Decimal,

    #[ts(as = "String")]
    pub total_tax: Decimal,

    #[ts(as = "String")]
    pub discount: Decimal,

    /// May be negative when the discount exceeds the taxed subtotal.
    #[ts(as = "String")]
    pub grand_total: Decimal,
}

/// Sums every row and applies the flat discount.
///
/// ## Example
/// ```rust
/// use invoice_core::totals::compute_aggregate_totals;
/// use invoice_core::types::{ItemId, LineItem, TaxRate};
/// use rust_decimal::Decimal;
///
/// let items = vec![
///     LineItem::new(ItemId::new(1), "A", Decimal::from(2), Decimal::from(50), TaxRate::whole(10)),
///     LineItem::new(ItemId::new(2), "B", Decimal::ONE, Decimal::from(20), TaxRate::zero()),
/// ];
/// let totals = compute_aggregate_totals(&items, Decimal::from(5));
///
/// assert_eq!(totals.subtotal, Decimal::from(120));
/// assert_eq!(totals.total_tax, Decimal::from(10));
/// assert_eq!(totals.grand_total, Decimal::from(125));
/// ```
pub fn compute_aggregate_totals(items: &[LineItem], discount: Decimal) -> Totals {
    let (subtotal, total_tax) = items
        .iter()
        .fold((Decimal::ZERO, Decimal::ZERO), |(subtotal, tax), item| {
            (subtotal.saturating_add(item.subtotal()), tax.saturating_add(item.tax()))
        });
    let discount = non_negative(discount);

    Totals {
        subtotal,
        total_tax,
        discount,
        grand_total: subtotal.saturating_add(total_tax).saturating_sub(discount),
    }
}

impl Totals {
    /// Rounded display values for the summary panel.
    pub fn summary(&self, format: &CurrencyFormat) -> TotalsSummary {
        TotalsSummary {
            subtotal: format.format_decimal(self.subtotal),
            tax: format.format_decimal(self.total_tax),
            discount: format.format_decimal(self.discount),
            total: format.format_decimal(self.grand_total),
        }
    }
}

/// Formatted totals as shown in the summary panel and the preview footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TotalsSummary {
    pub subtotal: String,
    pub tax: String,
    pub discount: String,
    pub total: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
