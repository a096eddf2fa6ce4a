//! # Export State
//!
//! The export gate shared by `export_pdf` calls. It lives behind an `Arc` so
//! the blocking export task can hold it past the command's borrow of state.

use std::sync::Arc;

use invoice_core::export::ExportGate;

#[derive(Debug, Clone, Default)]
pub struct ExportState {
    gate: Arc<ExportGate>,
}

impl ExportState {
    pub fn new() -> Self {
        ExportState::default()
    }

    pub fn gate(&self) -> Arc<ExportGate> {
        Arc::clone(&self.gate)
    }

    /// Whether the export button should currently be disabled.
    pub fn is_busy(&self) -> bool {
        self.gate.is_busy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_is_shared() {
        let state = ExportState::new();
        let gate = state.gate();

        let guard = gate.begin().unwrap();
        assert!(state.is_busy());
        drop(guard);
        assert!(!state.is_busy());
    }
}
