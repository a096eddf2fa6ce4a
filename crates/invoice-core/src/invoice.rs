//! # Invoice Model
//!
//! The invoice being edited and the reducer that applies form commands.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Form Action → Command                                │
//! │                                                                         │
//! │  Click "Add item" ─────────► AddRow              ──► items.push(..)    │
//! │                                                                         │
//! │  Click × on a row ─────────► RemoveRow { id }    ──► items.retain(..)  │
//! │                                                                         │
//! │  Type in a row ────────────► EditItem { id, .. } ──► items[i].f = v    │
//! │                                                                         │
//! │  Type in any other field ──► EditMeta { .. }     ──► meta.f = v        │
//! │                                                                         │
//! │  Click "Clear all" ────────► ClearAll { confirmed } ──► fresh invoice  │
//! │                                                                         │
//! │  A rejected command leaves the invoice untouched.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::input::{parse_date, parse_number};
use crate::types::{InvoiceMeta, ItemField, ItemId, LineItem, MetaField, TaxRate};
use crate::MAX_LINE_ITEMS;

// =============================================================================
// Environment
// =============================================================================

/// Everything a command needs from outside the model.
///
/// The desktop app backs this with the system clock and a random source;
/// tests use fixed values.
pub trait Environment {
    /// Milliseconds since the Unix epoch, used to derive row ids.
    fn now_millis(&self) -> u64;

    /// Today's date in the user's timezone.
    fn today(&self) -> NaiveDate;

    /// A freshly generated invoice number (`INV-4821`).
    fn new_invoice_number(&self) -> String;
}

// =============================================================================
// Commands
// =============================================================================

/// A mutation requested by the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "camelCase")]
#[ts(export)]
pub enum Command {
    AddRow,
    RemoveRow {
        id: ItemId,
    },
    EditItem {
        id: ItemId,
        field: ItemField,
        value: String,
    },
    EditMeta {
        field: MetaField,
        value: String,
    },
    ClearAll {
        /// The user accepted the confirmation prompt.
        confirmed: bool,
    },
}

/// What a successfully applied command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    RowAdded(ItemId),
    RowRemoved(ItemId),
    ItemEdited(ItemId),
    MetaEdited(MetaField),
    Cleared,
}

// =============================================================================
// Invoice
// =============================================================================

/// The invoice being edited: meta fields plus ordered rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Invoice {
    pub meta: InvoiceMeta,
    pub items: Vec<LineItem>,

    /// Highest id handed out so far.
    #[serde(skip)]
    #[ts(skip)]
    last_id: u64,
}

impl Invoice {
    /// An invoice with fresh meta and no rows.
    pub fn new(env: &dyn Environment) -> Self {
        Invoice::from_meta(InvoiceMeta::fresh(env.today(), env.new_invoice_number()))
    }

    /// An invoice with the given meta and no rows.
    pub fn from_meta(meta: InvoiceMeta) -> Self {
        Invoice {
            meta,
            items: Vec::new(),
            last_id: 0,
        }
    }

    /// Looks up a row.
    pub fn item(&self, id: ItemId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Applies one command.
    ///
    /// ## Errors
    /// - [`CoreError::ItemNotFound`] for an unknown row id
    /// - [`CoreError::TooManyItems`] when adding past [`MAX_LINE_ITEMS`]
    /// - [`CoreError::ConfirmationRequired`] for an unconfirmed reset
    ///
    /// On error nothing has been modified.
    pub fn apply(&mut self, command: Command, env: &dyn Environment) -> CoreResult<Applied> {
        match command {
            Command::AddRow => self.add_row(env).map(Applied::RowAdded),
            Command::RemoveRow { id } => self.remove_row(id).map(|_| Applied::RowRemoved(id)),
            Command::EditItem { id, field, value } => {
                self.edit_item(id, field, &value)?;
                Ok(Applied::ItemEdited(id))
            }
            Command::EditMeta { field, value } => {
                self.edit_meta(field, &value);
                Ok(Applied::MetaEdited(field))
            }
            Command::ClearAll { confirmed } => {
                if !confirmed {
                    return Err(CoreError::ConfirmationRequired {
                        action: "Clear all".to_string(),
                    });
                }
                self.clear(env);
                Ok(Applied::Cleared)
            }
        }
    }

    /// Appends a default row and returns its id.
    fn add_row(&mut self, env: &dyn Environment) -> CoreResult<ItemId> {
        if self.items.len() >= MAX_LINE_ITEMS {
            return Err(CoreError::TooManyItems {
                max: MAX_LINE_ITEMS,
            });
        }

        let id = self.next_id(env.now_millis());
        self.items.push(LineItem::default_row(id));
        Ok(id)
    }

    /// Timestamp-derived id, bumped past the last one if the clock has not
    /// advanced (two clicks in the same millisecond, or a clock step back).
    fn next_id(&mut self, now_millis: u64) -> ItemId {
        let existing_max = self.items.iter().map(|i| i.id.value()).max().unwrap_or(0);
        let floor = self.last_id.max(existing_max);
        let id = if now_millis > floor { now_millis } else { floor + 1 };
        self.last_id = id;
        ItemId::new(id)
    }

    fn remove_row(&mut self, id: ItemId) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|item| item.id != id);

        if self.items.len() == initial_len {
            Err(CoreError::ItemNotFound(id))
        } else {
            Ok(())
        }
    }

    fn edit_item(&mut self, id: ItemId, field: ItemField, value: &str) -> CoreResult<()> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(CoreError::ItemNotFound(id))?;

        match field {
            ItemField::Description => item.description = value.to_string(),
            ItemField::Quantity => item.quantity = parse_number(value),
            ItemField::UnitPrice => item.unit_price = parse_number(value),
            ItemField::TaxRate => item.tax_rate = TaxRate::from_percent(parse_number(value)),
        }
        Ok(())
    }

    fn edit_meta(&mut self, field: MetaField, value: &str) {
        let meta = &mut self.meta;
        match field {
            MetaField::InvoiceNumber => meta.invoice_number = value.to_string(),
            MetaField::InvoiceDate => meta.invoice_date = parse_date(value),
            MetaField::DueDate => meta.due_date = parse_date(value),
            MetaField::CompanyName => meta.company.name = value.to_string(),
            MetaField::CompanyEmail => meta.company.email = value.to_string(),
            MetaField::CompanyAddress => meta.company.address = value.to_string(),
            MetaField::CompanyPhone => meta.company.phone = value.to_string(),
            MetaField::ClientName => meta.client.name = value.to_string(),
            MetaField::ClientEmail => meta.client.email = value.to_string(),
            MetaField::ClientAddress => meta.client.address = value.to_string(),
            MetaField::ClientPhone => meta.client.phone = value.to_string(),
            MetaField::Notes => meta.notes = value.to_string(),
            MetaField::TaxRate => meta.tax_rate = TaxRate::from_percent(parse_number(value)),
            MetaField::Discount => meta.discount = parse_number(value),
        }
    }

    /// Resets to fresh meta and no rows. Row ids keep increasing.
    fn clear(&mut self, env: &dyn Environment) {
        self.meta = InvoiceMeta::fresh(env.today(), env.new_invoice_number());
        self.items.clear();
    }
}

// =============================================================================
// Test Support
// =============================================================================

/// Deterministic [`Environment`] for tests: the clock only moves when told.
#[cfg(test)]
pub(crate) mod test_env {
    use super::*;
    use std::cell::Cell;

    pub struct FixedEnv {
        pub millis: Cell<u64>,
        pub today: NaiveDate,
        pub number: &'static str,
    }

    impl FixedEnv {
        pub fn new() -> Self {
            FixedEnv {
                millis: Cell::new(1_700_000_000_000),
                today: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
                number: "INV-4821",
            }
        }

        pub fn advance(&self, millis: u64) {
            self.millis.set(self.millis.get() + millis);
        }
    }

    impl Environment for FixedEnv {
        fn now_millis(&self) -> u64 {
            self.millis.get()
        }

        fn today(&self) -> NaiveDate {
            self.today
        }

        fn new_invoice_number(&self) -> String {
            self.number.to_string()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
