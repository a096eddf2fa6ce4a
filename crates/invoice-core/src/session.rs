//! # Session
//!
//! Keeps the rendered view in lockstep with the invoice.
//!
//! ## Sync States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Clean ──── dispatch(cmd) ────► Dirty ──── recompute ────► Clean       │
//! │     ▲                              │                                    │
//! │     │                              │ apply failed                       │
//! │     └──────────────────────────────┘ (model and view unchanged)         │
//! │                                                                         │
//! │   dispatch never returns while Dirty.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::invoice::{Applied, Command, Environment, Invoice};
use crate::money::CurrencyFormat;
use crate::preview::{render_preview, Preview};
use crate::totals::{compute_aggregate_totals, Totals, TotalsSummary};
use crate::types::{InvoiceMeta, LineItem};

/// Everything the frontend renders after a command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InvoiceView {
    pub meta: InvoiceMeta,
    pub items: Vec<LineItem>,
    pub totals: Totals,
    pub summary: TotalsSummary,
    pub preview: Preview,
}

impl InvoiceView {
    /// Renders the view for `invoice`. Totals and preview come from one pass
    /// over the same rows.
    pub fn render(invoice: &Invoice, format: &CurrencyFormat) -> Self {
        let totals = compute_aggregate_totals(&invoice.items, invoice.meta.discount);
        InvoiceView {
            meta: invoice.meta.clone(),
            items: invoice.items.clone(),
            totals,
            summary: totals.summary(format),
            preview: render_preview(&invoice.meta, &invoice.items, &totals, format),
        }
    }
}

/// Whether the view matches the invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Clean,
    Dirty,
}

/// The invoice being edited together with its last rendered view.
#[derive(Debug, Clone)]
pub struct Session {
    invoice: Invoice,
    format: CurrencyFormat,
    view: InvoiceView,
    state: SyncState,
}

impl Session {
    /// Starts a session over a fresh invoice with no rows.
    pub fn new(env: &dyn Environment, format: CurrencyFormat) -> Self {
        Session::from_invoice(Invoice::new(env), format)
    }

    pub fn from_invoice(invoice: Invoice, format: CurrencyFormat) -> Self {
        let view = InvoiceView::render(&invoice, &format);
        Session {
            invoice,
            format,
            view,
            state: SyncState::Clean,
        }
    }

    pub fn invoice(&self) -> &Invoice {
        &self.invoice
    }

    pub fn view(&self) -> &InvoiceView {
        &self.view
    }

    pub fn format(&self) -> &CurrencyFormat {
        &self.format
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Applies `command` and re-renders.
    ///
    /// A rejected command returns its error with the invoice and the view
    /// exactly as they were.
    pub fn dispatch(&mut self, command: Command, env: &dyn Environment) -> CoreResult<Applied> {
        let applied = self.invoice.apply(command, env)?;
        self.state = SyncState::Dirty;
        self.recompute();
        Ok(applied)
    }

    /// Re-renders the view from the current invoice.
    pub fn recompute(&mut self) -> &InvoiceView {
        self.view = InvoiceView::render(&self.invoice, &self.format);
        self.state = SyncState::Clean;
        &self.view
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::invoice::test_env::FixedEnv;
    use crate::preview::{COMPANY_NAME_PLACEHOLDER, NO_ITEMS_MESSAGE};
    use crate::types::{ItemField, ItemId, MetaField, TaxRate};
    use rust_decimal::Decimal;

    fn add(session: &mut Session, env: &FixedEnv) -> ItemId {
        match session.dispatch(Command::AddRow, env).unwrap() {
            Applied::RowAdded(id) => id,
            other => panic!("unexpected {:?}", other),
        }
    }

    fn edit(session: &mut Session, env: &FixedEnv, id: ItemId, field: ItemField, value: &str) {
        session
            .dispatch(
                Command::EditItem {
                    id,
                    field,
                    value: value.to_string(),
                },
                env,
            )
            .unwrap();
    }

    #[test]
    fn test_new_session_is_clean() {
        let env = FixedEnv::new();
        let session = Session::new(&env, CurrencyFormat::default());

        assert_eq!(session.state(), SyncState::Clean);
        assert_eq!(session.view().totals, Totals::default());
        assert_eq!(session.view().preview.company.name, COMPANY_NAME_PLACEHOLDER);
    }

    #[test]
    fn test_dispatch_updates_view() {
        let env = FixedEnv::new();
        let mut session = Session::new(&env, CurrencyFormat::default());

        let first = add(&mut session, &env);
        edit(&mut session, &env, first, ItemField::Quantity, "2");
        edit(&mut session, &env, first, ItemField::UnitPrice, "50");

        let second = add(&mut session, &env);
        edit(&mut session, &env, second, ItemField::UnitPrice, "20");
        edit(&mut session, &env, second, ItemField::TaxRate, "0");

        session
            .dispatch(
                Command::EditMeta {
                    field: MetaField::Discount,
                    value: "5".to_string(),
                },
                &env,
            )
            .unwrap();

        let view = session.view();
        assert_eq!(session.state(), SyncState::Clean);
        assert_eq!(view.totals.subtotal, Decimal::from(120));
        assert_eq!(view.totals.total_tax, Decimal::from(10));
        assert_eq!(view.totals.grand_total, Decimal::from(125));
        assert_eq!(view.summary.total, "$125.00");
        assert_eq!(view.preview.rows[0].amount, "$110.00");
        assert_eq!(view.preview.totals, view.summary);
    }

    #[test]
    fn test_grand_total_identity_after_any_sequence() {
        let env = FixedEnv::new();
        let mut session = Session::new(&env, CurrencyFormat::default());

        let a = add(&mut session, &env);
        let b = add(&mut session, &env);
        edit(&mut session, &env, a, ItemField::UnitPrice, "19.99");
        edit(&mut session, &env, b, ItemField::Quantity, "3.5");
        edit(&mut session, &env, b, ItemField::UnitPrice, "7.25");
        session.dispatch(Command::RemoveRow { id: a }, &env).unwrap();
        add(&mut session, &env);

        let totals = session.view().totals;
        assert_eq!(totals.grand_total, totals.subtotal + totals.total_tax - totals.discount);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let env = FixedEnv::new();
        let mut session = Session::new(&env, CurrencyFormat::default());
        let id = add(&mut session, &env);
        edit(&mut session, &env, id, ItemField::UnitPrice, "12.345");

        let once = session.recompute().clone();
        let twice = session.recompute().clone();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_failed_command_leaves_view_untouched() {
        let env = FixedEnv::new();
        let mut session = Session::new(&env, CurrencyFormat::default());
        add(&mut session, &env);
        let before = session.view().clone();

        let err = session
            .dispatch(Command::RemoveRow { id: ItemId::new(7) }, &env)
            .unwrap_err();

        assert!(matches!(err, CoreError::ItemNotFound(_)));
        assert_eq!(session.view(), &before);
        assert_eq!(session.state(), SyncState::Clean);
    }

    #[test]
    fn test_remove_all_rows() {
        let env = FixedEnv::new();
        let mut session = Session::new(&env, CurrencyFormat::default());
        let a = add(&mut session, &env);
        let b = add(&mut session, &env);
        edit(&mut session, &env, a, ItemField::UnitPrice, "40");
        edit(&mut session, &env, b, ItemField::UnitPrice, "60");

        session.dispatch(Command::RemoveRow { id: a }, &env).unwrap();
        session.dispatch(Command::RemoveRow { id: b }, &env).unwrap();

        let view = session.view();
        assert_eq!(view.totals.subtotal, Decimal::ZERO);
        assert_eq!(view.totals.total_tax, Decimal::ZERO);
        assert_eq!(view.totals.grand_total, Decimal::ZERO);
        assert!(view.preview.rows.is_empty());
        assert_eq!(view.preview.empty_message.as_deref(), Some(NO_ITEMS_MESSAGE));
    }

    #[test]
    fn test_reset_then_add_leaves_one_default_row() {
        let env = FixedEnv::new();
        let mut session = Session::new(&env, CurrencyFormat::default());
        let id = add(&mut session, &env);
        edit(&mut session, &env, id, ItemField::UnitPrice, "99");

        session.dispatch(Command::ClearAll { confirmed: true }, &env).unwrap();
        add(&mut session, &env);

        let view = session.view();
        assert_eq!(view.items.len(), 1);
        let row = &view.items[0];
        assert_eq!(row.quantity, Decimal::ONE);
        assert_eq!(row.unit_price, Decimal::ZERO);
        assert_eq!(row.tax_rate, TaxRate::whole(10));
        assert_eq!(view.totals.subtotal, Decimal::ZERO);
        assert_eq!(view.totals.total_tax, Decimal::ZERO);
        assert_eq!(view.totals.grand_total, Decimal::ZERO);
    }

    #[test]
    fn test_huge_numbers_saturate_and_session_keeps_working() {
        let env = FixedEnv::new();
        let mut session = Session::new(&env, CurrencyFormat::default());
        let id = add(&mut session, &env);

        edit(&mut session, &env, id, ItemField::Quantity, "1e15");
        edit(&mut session, &env, id, ItemField::UnitPrice, "1e15");
        assert_eq!(session.view().totals.subtotal, Decimal::MAX);

        edit(&mut session, &env, id, ItemField::UnitPrice, "1e14");
        edit(&mut session, &env, id, ItemField::TaxRate, "1e30");
        let other = add(&mut session, &env);
        edit(&mut session, &env, other, ItemField::Quantity, "79228162514264337593543950335");
        edit(&mut session, &env, other, ItemField::UnitPrice, "1e28");

        let view = session.view();
        assert_eq!(session.state(), SyncState::Clean);
        assert_eq!(view.totals.grand_total, Decimal::MAX);
        assert_eq!(view.summary.total, "$92,233,720,368,547,758.07");
        assert_eq!(view.preview.rows[0].amount, "$92,233,720,368,547,758.07");

        edit(&mut session, &env, id, ItemField::Quantity, "2");
        edit(&mut session, &env, id, ItemField::UnitPrice, "50");
        edit(&mut session, &env, id, ItemField::TaxRate, "10");
        session.dispatch(Command::RemoveRow { id: other }, &env).unwrap();
        assert_eq!(session.view().totals.grand_total, Decimal::from(110));
    }

    #[test]
    fn test_currency_symbol_flows_into_view() {
        let env = FixedEnv::new();
        let mut session = Session::new(&env, CurrencyFormat::new("€"));
        let id = add(&mut session, &env);
        edit(&mut session, &env, id, ItemField::UnitPrice, "1000");

        assert_eq!(session.view().summary.subtotal, "€1,000.00");
    }
}
