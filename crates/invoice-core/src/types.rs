//! # Domain Types
//!
//! Core domain types used throughout the invoice builder.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   InvoiceMeta   │   │    LineItem     │   │     TaxRate     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  invoice_number │   │  id (ItemId)    │   │  percent        │       │
//! │  │  dates          │   │  description    │   │  10 = 10%       │       │
//! │  │  company/client │   │  quantity       │   └─────────────────┘       │
//! │  │  notes          │   │  unit_price     │                              │
//! │  │  tax_rate       │   │  tax_rate       │   ┌─────────────────┐       │
//! │  │  discount       │   └─────────────────┘   │      Theme      │       │
//! │  └─────────────────┘                         │  Light / Dark   │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every numeric field is stored already coerced (see [`crate::input`]), so
//! nothing downstream has to deal with negative or non-numeric values.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::input::non_negative;

// =============================================================================
// Item Identity
// =============================================================================

/// Identifier of a line item, derived from its creation time in milliseconds.
///
/// Ids only have to be unique within one invoice; [`crate::invoice::Invoice`]
/// bumps the timestamp when two rows are added within the same millisecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemId(#[ts(type = "number")] u64);

impl ItemId {
    #[inline]
    pub const fn new(value: u64) -> Self {
        ItemId(value)
    }

    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Tax Rate
// =============================================================================

/// A tax rate as a percentage (`10` = 10%).
///
/// Negative input is clamped to zero at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(#[ts(as = "String")] Decimal);

impl TaxRate {
    /// Creates a tax rate from a percentage.
    pub fn from_percent(percent: Decimal) -> Self {
        TaxRate(non_negative(percent))
    }

    /// Creates a tax rate from a whole percentage.
    pub fn whole(percent: u32) -> Self {
        TaxRate(Decimal::from(percent))
    }

    /// Zero tax rate.
    #[inline]
    pub fn zero() -> Self {
        TaxRate(Decimal::ZERO)
    }

    /// Returns the rate as a percentage.
    #[inline]
    pub fn percent(&self) -> Decimal {
        self.0
    }
}

/// `10%`, `7.5%`, `0%`.
impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One invoice row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    pub id: ItemId,

    /// Free text; may be blank (the preview shows a placeholder).
    pub description: String,

    /// Always ≥ 0.
    #[ts(as = "String")]
    pub quantity: Decimal,

    /// Price per unit, always ≥ 0.
    #[ts(as = "String")]
    pub unit_price: Decimal,

    pub tax_rate: TaxRate,
}

impl LineItem {
    /// Creates a line item, clamping negative numbers to zero.
    pub fn new(
        id: ItemId,
        description: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
        tax_rate: TaxRate,
    ) -> Self {
        LineItem {
            id,
            description: description.into(),
            quantity: non_negative(quantity),
            unit_price: non_negative(unit_price),
            tax_rate,
        }
    }

    /// The row the "Add item" button creates: qty 1, price 0, tax 10%.
    pub fn default_row(id: ItemId) -> Self {
        LineItem::new(
            id,
            String::new(),
            Decimal::ONE,
            Decimal::ZERO,
            TaxRate::whole(crate::DEFAULT_ITEM_TAX_PERCENT),
        )
    }
}

// =============================================================================
// Parties
// =============================================================================

/// Contact block for the issuing company or the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Party {
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone: String,
}

// =============================================================================
// Invoice Meta
// =============================================================================

/// Everything on the form that is not a line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InvoiceMeta {
    pub invoice_number: String,

    #[ts(as = "Option<String>")]
    pub invoice_date: Option<NaiveDate>,

    #[ts(as = "Option<String>")]
    pub due_date: Option<NaiveDate>,

    pub company: Party,
    pub client: Party,
    pub notes: String,

    /// Global tax field. Kept with the invoice and shown in the summary;
    /// row totals use each row's own rate.
    pub tax_rate: TaxRate,

    /// Flat amount subtracted from the grand total, always ≥ 0.
    #[ts(as = "String")]
    pub discount: Decimal,
}

impl InvoiceMeta {
    /// Meta for a brand-new invoice.
    ///
    /// ## Defaults
    /// - invoice date: `today`
    /// - due date: `today + 15 days`
    /// - tax: 10%, discount: 0
    /// - every text field blank
    pub fn fresh(today: NaiveDate, invoice_number: impl Into<String>) -> Self {
        InvoiceMeta {
            invoice_number: invoice_number.into(),
            invoice_date: Some(today),
            due_date: today.checked_add_signed(chrono::Duration::days(crate::DEFAULT_DUE_DAYS)),
            company: Party::default(),
            client: Party::default(),
            notes: String::new(),
            tax_rate: TaxRate::whole(crate::DEFAULT_INVOICE_TAX_PERCENT),
            discount: Decimal::ZERO,
        }
    }
}

/// Formats a generated invoice number from a four-digit suffix.
///
/// Suffixes outside `1000..=9999` are folded into that range.
///
/// ## Example
/// ```rust
/// use invoice_core::types::invoice_number_from_suffix;
///
/// assert_eq!(invoice_number_from_suffix(4821), "INV-4821");
/// assert_eq!(invoice_number_from_suffix(12), "INV-1012");
/// ```
pub fn invoice_number_from_suffix(suffix: u32) -> String {
    let suffix = if (1000..=9999).contains(&suffix) {
        suffix
    } else {
        1000 + suffix % 9000
    };
    format!("{}{}", crate::INVOICE_NUMBER_PREFIX, suffix)
}

// =============================================================================
// Editable Fields
// =============================================================================

/// Editable fields of a line item, named as the frontend sends them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum ItemField {
    Description,
    Quantity,
    UnitPrice,
    TaxRate,
}

impl ItemField {
    pub const ALL: [ItemField; 4] = [
        ItemField::Description,
        ItemField::Quantity,
        ItemField::UnitPrice,
        ItemField::TaxRate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemField::Description => "description",
            ItemField::Quantity => "quantity",
            ItemField::UnitPrice => "unitPrice",
            ItemField::TaxRate => "taxRate",
        }
    }
}

impl FromStr for ItemField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_field_name("item field", s, &Self::ALL, Self::as_str)
    }
}

/// Editable invoice-level fields, named as the frontend sends them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum MetaField {
    InvoiceNumber,
    InvoiceDate,
    DueDate,
    CompanyName,
    CompanyEmail,
    CompanyAddress,
    CompanyPhone,
    ClientName,
    ClientEmail,
    ClientAddress,
    ClientPhone,
    Notes,
    TaxRate,
    Discount,
}

impl MetaField {
    pub const ALL: [MetaField; 14] = [
        MetaField::InvoiceNumber,
        MetaField::InvoiceDate,
        MetaField::DueDate,
        MetaField::CompanyName,
        MetaField::CompanyEmail,
        MetaField::CompanyAddress,
        MetaField::CompanyPhone,
        MetaField::ClientName,
        MetaField::ClientEmail,
        MetaField::ClientAddress,
        MetaField::ClientPhone,
        MetaField::Notes,
        MetaField::TaxRate,
        MetaField::Discount,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetaField::InvoiceNumber => "invoiceNumber",
            MetaField::InvoiceDate => "invoiceDate",
            MetaField::DueDate => "dueDate",
            MetaField::CompanyName => "companyName",
            MetaField::CompanyEmail => "companyEmail",
            MetaField::CompanyAddress => "companyAddress",
            MetaField::CompanyPhone => "companyPhone",
            MetaField::ClientName => "clientName",
            MetaField::ClientEmail => "clientEmail",
            MetaField::ClientAddress => "clientAddress",
            MetaField::ClientPhone => "clientPhone",
            MetaField::Notes => "notes",
            MetaField::TaxRate => "taxRate",
            MetaField::Discount => "discount",
        }
    }
}

impl FromStr for MetaField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_field_name("invoice field", s, &Self::ALL, Self::as_str)
    }
}

fn parse_field_name<T: Copy>(
    field: &str,
    raw: &str,
    all: &[T],
    name: fn(&T) -> &'static str,
) -> Result<T, ValidationError> {
    all.iter()
        .find(|candidate| name(*candidate) == raw)
        .copied()
        .ok_or_else(|| ValidationError::NotAllowed {
            field: field.to_string(),
            allowed: all.iter().map(|c| name(c).to_string()).collect(),
        })
}

// =============================================================================
// Theme
// =============================================================================

/// Colour scheme of the window, the only persisted preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The theme for a toggle switch state (`checked` = dark).
    pub fn from_toggle(checked: bool) -> Self {
        if checked {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(ValidationError::NotAllowed {
                field: "theme".to_string(),
                allowed: vec!["light".to_string(), "dark".to_string()],
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_row() {
        let row = LineItem::default_row(ItemId::new(1));
        assert_eq!(row.quantity, Decimal::ONE);
        assert_eq!(row.unit_price, Decimal::ZERO);
        assert_eq!(row.tax_rate, TaxRate::whole(10));
        assert!(row.description.is_empty());
    }

    #[test]
    fn test_line_item_clamps_negative_numbers() {
        let row = LineItem::new(
            ItemId::new(1),
            "Refund",
            Decimal::from(-3),
            Decimal::from(-10),
            TaxRate::from_percent(Decimal::from(-5)),
        );
        assert_eq!(row.quantity, Decimal::ZERO);
        assert_eq!(row.unit_price, Decimal::ZERO);
        assert_eq!(row.tax_rate, TaxRate::zero());
    }

    #[test]
    fn test_tax_rate_display() {
        assert_eq!(TaxRate::whole(10).to_string(), "10%");
        assert_eq!(TaxRate::from_percent(Decimal::new(750, 2)).to_string(), "7.5%");
        assert_eq!(TaxRate::from_percent(Decimal::from(-5)), TaxRate::zero());
    }

    #[test]
    fn test_fresh_meta() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let meta = InvoiceMeta::fresh(today, "INV-4821");

        assert_eq!(meta.invoice_date, Some(today));
        assert_eq!(meta.due_date, NaiveDate::from_ymd_opt(2024, 2, 4));
        assert_eq!(meta.tax_rate, TaxRate::whole(10));
        assert_eq!(meta.discount, Decimal::ZERO);
        assert_eq!(meta.company, Party::default());
    }

    #[test]
    fn test_invoice_number_suffix_range() {
        assert_eq!(invoice_number_from_suffix(1000), "INV-1000");
        assert_eq!(invoice_number_from_suffix(9999), "INV-9999");
        assert_eq!(invoice_number_from_suffix(10_000), "INV-2000");
    }

    #[test]
    fn test_field_names() {
        assert_eq!("unitPrice".parse::<ItemField>().unwrap(), ItemField::UnitPrice);
        assert_eq!("clientPhone".parse::<MetaField>().unwrap(), MetaField::ClientPhone);
        for field in MetaField::ALL {
            assert_eq!(field.as_str().parse::<MetaField>().unwrap(), field);
        }

        let err = "price".parse::<ItemField>().unwrap_err();
        assert!(matches!(err, ValidationError::NotAllowed { .. }));
    }

    #[test]
    fn test_theme() {
        assert_eq!(Theme::default(), Theme::Light);
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert!("blue".parse::<Theme>().is_err());
        assert_eq!(Theme::from_toggle(true), Theme::Dark);
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
    }
}
