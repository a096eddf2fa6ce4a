//! # Preview Module
//!
//! The read-only invoice document shown next to the form and used as the
//! export source.
//!
//! ## Placeholders
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Form field blank?  ──► preview shows the placeholder, never ""         │
//! │                                                                         │
//! │  company name       "Your Company LLC"                                  │
//! │  client name        "Client Company LLC"                                │
//! │  invoice number     "INV-001"                                           │
//! │  notes              "Thank you for your business!"                      │
//! │  no rows at all     "No items added yet"                                │
//! │  ...                                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::input::is_blank;
use crate::money::CurrencyFormat;
use crate::totals::{Totals, TotalsSummary};
use crate::types::{InvoiceMeta, ItemId, LineItem, Party};

// =============================================================================
// Placeholder Text
// =============================================================================

pub const COMPANY_NAME_PLACEHOLDER: &str = "Your Company LLC";
pub const COMPANY_ADDRESS_PLACEHOLDER: &str = "123 Business St, City, Country";
pub const COMPANY_EMAIL_PLACEHOLDER: &str = "contact@company.com";
pub const COMPANY_PHONE_PLACEHOLDER: &str = "+1 (555) 123-4567";

pub const CLIENT_NAME_PLACEHOLDER: &str = "Client Company LLC";
pub const CLIENT_ADDRESS_PLACEHOLDER: &str = "123 Client St, City, Country";
pub const CLIENT_EMAIL_PLACEHOLDER: &str = "contact@client.com";
pub const CLIENT_PHONE_PLACEHOLDER: &str = "+1 (555) 987-6543";

pub const INVOICE_NUMBER_PLACEHOLDER: &str = "INV-001";
pub const INVOICE_DATE_PLACEHOLDER: &str = "Jan 1, 2023";
pub const DUE_DATE_PLACEHOLDER: &str = "Jan 15, 2023";
pub const NOTES_PLACEHOLDER: &str = "Thank you for your business!";

pub const ITEM_DESCRIPTION_PLACEHOLDER: &str = "Item description";
pub const NO_ITEMS_MESSAGE: &str = "No items added yet";

/// `Jan 5, 2024`.
pub const PREVIEW_DATE_FORMAT: &str = "%b %-d, %Y";

// =============================================================================
// Preview Model
// =============================================================================

/// Contact block as printed on the invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PreviewParty {
    pub name: String,
    pub address: String,
    /// `"{email} | {phone}"`
    pub contact: String,
}

/// One printed row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PreviewRow {
    pub id: ItemId,
    pub description: String,
    pub quantity: String,
    pub unit_price: String,
    pub tax_rate: String,
    pub amount: String,
}

/// The complete printed invoice. Every field is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Preview {
    pub company: PreviewParty,
    pub client: PreviewParty,
    pub invoice_number: String,
    pub invoice_date: String,
    pub due_date: String,
    pub notes: String,
    pub rows: Vec<PreviewRow>,
    /// Set exactly when `rows` is empty.
    pub empty_message: Option<String>,
    pub totals: TotalsSummary,
}

/// Renders the preview for the current form state.
///
/// `totals` must come from the same `items`; [`crate::session::Session`]
/// guarantees that by computing both in one pass.
pub fn render_preview(
    meta: &InvoiceMeta,
    items: &[LineItem],
    totals: &Totals,
    format: &CurrencyFormat,
) -> Preview {
    let rows: Vec<PreviewRow> = items.iter().map(|item| render_row(item, format)).collect();
    let empty_message = rows.is_empty().then(|| NO_ITEMS_MESSAGE.to_string());

    Preview {
        company: render_party(
            &meta.company,
            [
                COMPANY_NAME_PLACEHOLDER,
                COMPANY_ADDRESS_PLACEHOLDER,
                COMPANY_EMAIL_PLACEHOLDER,
                COMPANY_PHONE_PLACEHOLDER,
            ],
        ),
        client: render_party(
            &meta.client,
            [
                CLIENT_NAME_PLACEHOLDER,
                CLIENT_ADDRESS_PLACEHOLDER,
                CLIENT_EMAIL_PLACEHOLDER,
                CLIENT_PHONE_PLACEHOLDER,
            ],
        ),
        invoice_number: or_placeholder(&meta.invoice_number, INVOICE_NUMBER_PLACEHOLDER),
        invoice_date: format_date(meta.invoice_date, INVOICE_DATE_PLACEHOLDER),
        due_date: format_date(meta.due_date, DUE_DATE_PLACEHOLDER),
        notes: or_placeholder(&meta.notes, NOTES_PLACEHOLDER),
        rows,
        empty_message,
        totals: totals.summary(format),
    }
}

fn render_row(item: &LineItem, format: &CurrencyFormat) -> PreviewRow {
    PreviewRow {
        id: item.id,
        description: or_placeholder(&item.description, ITEM_DESCRIPTION_PLACEHOLDER),
        quantity: item.quantity.normalize().to_string(),
        unit_price: format.format_decimal(item.unit_price),
        tax_rate: item.tax_rate.to_string(),
        amount: format.format_decimal(item.total()),
    }
}

/// Placeholders in order: name, address, email, phone.
fn render_party(party: &Party, placeholders: [&str; 4]) -> PreviewParty {
    let [name, address, email, phone] = placeholders;
    PreviewParty {
        name: or_placeholder(&party.name, name),
        address: or_placeholder(&party.address, address),
        contact: format!(
            "{} | {}",
            or_placeholder(&party.email, email),
            or_placeholder(&party.phone, phone)
        ),
    }
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if is_blank(value) {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

fn format_date(date: Option<NaiveDate>, placeholder: &str) -> String {
    date.map(|d| d.format(PREVIEW_DATE_FORMAT).to_string())
        .unwrap_or_else(|| placeholder.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::totals::compute_aggregate_totals;
    use crate::types::TaxRate;
    use rust_decimal::Decimal;

    fn blank_meta() -> InvoiceMeta {
        InvoiceMeta {
            invoice_number: String::new(),
            invoice_date: None,
            due_date: None,
            company: Party::default(),
            client: Party::default(),
            notes: String::new(),
            tax_rate: TaxRate::whole(10),
            discount: Decimal::ZERO,
        }
    }

    fn render(meta: &InvoiceMeta, items: &[LineItem]) -> Preview {
        let totals = compute_aggregate_totals(items, meta.discount);
        render_preview(meta, items, &totals, &CurrencyFormat::default())
    }

    #[test]
    fn test_blank_form_uses_placeholders() {
        let preview = render(&blank_meta(), &[]);

        assert_eq!(preview.company.name, "Your Company LLC");
        assert_eq!(preview.company.address, "123 Business St, City, Country");
        assert_eq!(preview.company.contact, "contact@company.com | +1 (555) 123-4567");
        assert_eq!(preview.client.name, "Client Company LLC");
        assert_eq!(preview.client.contact, "contact@client.com | +1 (555) 987-6543");
        assert_eq!(preview.invoice_number, "INV-001");
        assert_eq!(preview.invoice_date, "Jan 1, 2023");
        assert_eq!(preview.due_date, "Jan 15, 2023");
        assert_eq!(preview.notes, "Thank you for your business!");
    }

    #[test]
    fn test_whitespace_counts_as_blank() {
        let mut meta = blank_meta();
        meta.company.name = "   ".to_string();
        assert_eq!(render(&meta, &[]).company.name, COMPANY_NAME_PLACEHOLDER);
    }

    #[test]
    fn test_filled_fields_mirror_form() {
        let mut meta = blank_meta();
        meta.company.name = "Acme Corp".to_string();
        meta.company.email = "billing@acme.test".to_string();
        meta.client.phone = "+44 20 7946 0000".to_string();
        meta.invoice_number = "INV-4821".to_string();
        meta.invoice_date = NaiveDate::from_ymd_opt(2024, 3, 9);
        meta.notes = "Net 15".to_string();

        let preview = render(&meta, &[]);
        assert_eq!(preview.company.name, "Acme Corp");
        assert_eq!(preview.company.contact, "billing@acme.test | +1 (555) 123-4567");
        assert_eq!(preview.client.contact, "contact@client.com | +44 20 7946 0000");
        assert_eq!(preview.invoice_number, "INV-4821");
        assert_eq!(preview.invoice_date, "Mar 9, 2024");
        assert_eq!(preview.notes, "Net 15");
    }

    #[test]
    fn test_no_items_message() {
        let preview = render(&blank_meta(), &[]);
        assert!(preview.rows.is_empty());
        assert_eq!(preview.empty_message.as_deref(), Some("No items added yet"));
        assert_eq!(preview.totals.total, "$0.00");
    }

    #[test]
    fn test_rows() {
        let items = vec![
            LineItem::new(ItemId::new(1), "Logo design", Decimal::from(2), Decimal::from(50), TaxRate::whole(10)),
            LineItem::new(ItemId::new(2), "", Decimal::new(150, 2), Decimal::new(123456, 2), TaxRate::zero()),
        ];
        let preview = render(&blank_meta(), &items);

        assert_eq!(preview.empty_message, None);
        assert_eq!(preview.rows.len(), 2);

        let first = &preview.rows[0];
        assert_eq!(first.description, "Logo design");
        assert_eq!(first.quantity, "2");
        assert_eq!(first.unit_price, "$50.00");
        assert_eq!(first.tax_rate, "10%");
        assert_eq!(first.amount, "$110.00");

        let second = &preview.rows[1];
        assert_eq!(second.description, "Item description");
        assert_eq!(second.quantity, "1.5");
        assert_eq!(second.unit_price, "$1,234.56");
        assert_eq!(second.amount, "$1,851.84");
    }
}
