//! # Invoice State
//!
//! The editing session shared by all invoice commands.
//!
//! ## State Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  invoke('edit_item', { id, field: 'quantity', value: '3' })            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  InvoiceState::dispatch(Command::EditItem { .. })                      │
//! │       │  lock ──► Session::dispatch ──► apply ──► recompute ──► unlock │
//! │       ▼                                                                 │
//! │  InvoiceView (items, totals, summary, preview) ──► frontend re-renders │
//! │                                                                         │
//! │  NOTE: The lock is held for the whole dispatch, so commands never      │
//! │        interleave and a view is never built from half an edit.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{Local, NaiveDate, Utc};
use invoice_core::{
    invoice_number_from_suffix, Command, CoreResult, Environment, InvoiceView, Session,
};
use tracing::debug;
use uuid::Uuid;

// =============================================================================
// System Environment
// =============================================================================

/// Wall clock, local calendar and a random invoice number.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn now_millis(&self) -> u64 {
        u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn new_invoice_number(&self) -> String {
        let suffix = 1000 + (Uuid::new_v4().as_u128() % 9000) as u32;
        invoice_number_from_suffix(suffix)
    }
}

// =============================================================================
// Invoice State
// =============================================================================

/// Thread-safe handle on the session for Tauri state management.
#[derive(Debug, Clone)]
pub struct InvoiceState {
    session: Arc<Mutex<Session>>,
}

impl InvoiceState {
    pub fn new(session: Session) -> Self {
        InvoiceState {
            session: Arc::new(Mutex::new(session)),
        }
    }

    /// A panicking command cannot leave the session half-edited (dispatch
    /// either applies fully or not at all), so a poisoned lock is recovered.
    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Session) -> R,
    {
        f(&self.lock())
    }

    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Session) -> R,
    {
        f(&mut self.lock())
    }

    /// The current view, cloned for serialization.
    pub fn view(&self) -> InvoiceView {
        self.with_session(|s| s.view().clone())
    }

    /// Runs commands in order under one lock and returns the resulting view.
    ///
    /// Stops at the first failure; commands before it stay applied.
    pub fn dispatch_all(
        &self,
        commands: impl IntoIterator<Item = Command>,
        env: &dyn Environment,
    ) -> CoreResult<InvoiceView> {
        self.with_session_mut(|session| {
            for command in commands {
                let applied = session.dispatch(command, env)?;
                debug!(?applied, "Command applied");
            }
            Ok(session.view().clone())
        })
    }

    pub fn dispatch(&self, command: Command, env: &dyn Environment) -> CoreResult<InvoiceView> {
        self.dispatch_all([command], env)
    }

    /// Invoice number as currently typed, for naming the export.
    pub fn invoice_number(&self) -> String {
        self.with_session(|s| s.invoice().meta.invoice_number.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invoice_core::{CoreError, CurrencyFormat, ItemField, MetaField};

    fn state() -> InvoiceState {
        InvoiceState::new(Session::new(&SystemEnvironment, CurrencyFormat::default()))
    }

    #[test]
    fn test_system_environment_invoice_number() {
        let number = SystemEnvironment.new_invoice_number();
        let suffix: u32 = number.strip_prefix("INV-").unwrap().parse().unwrap();
        assert!((1000..=9999).contains(&suffix));
    }

    #[test]
    fn test_dispatch_returns_fresh_view() {
        let state = state();
        let view = state.dispatch(Command::AddRow, &SystemEnvironment).unwrap();
        assert_eq!(view.items.len(), 1);

        let id = view.items[0].id;
        let view = state
            .dispatch(
                Command::EditItem {
                    id,
                    field: ItemField::UnitPrice,
                    value: "25".to_string(),
                },
                &SystemEnvironment,
            )
            .unwrap();
        assert_eq!(view.summary.total, "$27.50");
        assert_eq!(state.view(), view);
    }

    #[test]
    fn test_reset_and_add_in_one_lock() {
        let state = state();
        state.dispatch(Command::AddRow, &SystemEnvironment).unwrap();
        state.dispatch(Command::AddRow, &SystemEnvironment).unwrap();

        let view = state
            .dispatch_all(
                [Command::ClearAll { confirmed: true }, Command::AddRow],
                &SystemEnvironment,
            )
            .unwrap();
        assert_eq!(view.items.len(), 1);
    }

    #[test]
    fn test_unconfirmed_reset_is_rejected() {
        let state = state();
        state
            .dispatch(
                Command::EditMeta {
                    field: MetaField::ClientName,
                    value: "Globex".to_string(),
                },
                &SystemEnvironment,
            )
            .unwrap();

        let err = state
            .dispatch_all(
                [Command::ClearAll { confirmed: false }, Command::AddRow],
                &SystemEnvironment,
            )
            .unwrap_err();

        assert!(matches!(err, CoreError::ConfirmationRequired { .. }));
        assert!(state.view().items.is_empty());
        assert_eq!(state.view().meta.client.name, "Globex");
    }
}
