//! # Configuration State
//!
//! Application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`INVOICE_*`)
//! 2. Defaults (this file)
//!
//! The database location (`INVOICE_DB_PATH`) is resolved in `lib.rs`
//! before any state exists.
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use directories::UserDirs;
use invoice_core::CurrencyFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const CURRENCY_SYMBOL_VAR: &str = "INVOICE_CURRENCY_SYMBOL";
pub const EXPORT_DIR_VAR: &str = "INVOICE_EXPORT_DIR";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Prefix for every displayed amount.
    /// Default: "$"
    pub currency_symbol: String,

    /// Where exported PDFs are written.
    /// Default: the user's download directory
    pub export_dir: PathBuf,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            currency_symbol: "$".to_string(),
            export_dir: default_export_dir(),
        }
    }
}

/// Downloads, else home, else the working directory.
fn default_export_dir() -> PathBuf {
    UserDirs::new()
        .and_then(|dirs| {
            dirs.download_dir()
                .map(PathBuf::from)
                .or_else(|| Some(dirs.home_dir().to_path_buf()))
        })
        .unwrap_or_else(|| PathBuf::from("."))
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `INVOICE_CURRENCY_SYMBOL`: Override the currency symbol (`€`)
    /// - `INVOICE_EXPORT_DIR`: Override the export directory
    pub fn from_env() -> Self {
        ConfigState::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) over any variable source. Blank
    /// values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ConfigState::default();
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(symbol) = lookup(CURRENCY_SYMBOL_VAR) {
            config.currency_symbol = symbol.trim().to_string();
        }

        if let Some(dir) = lookup(EXPORT_DIR_VAR) {
            config.export_dir = PathBuf::from(dir);
        }

        config
    }

    pub fn currency_format(&self) -> CurrencyFormat {
        CurrencyFormat::new(self.currency_symbol.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> ConfigState {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ConfigState::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.export_dir, default_export_dir());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            (CURRENCY_SYMBOL_VAR, "€"),
            (EXPORT_DIR_VAR, "/tmp/invoices"),
        ]);
        assert_eq!(config.currency_symbol, "€");
        assert_eq!(config.export_dir, PathBuf::from("/tmp/invoices"));
    }

    #[test]
    fn test_blank_override_ignored() {
        let config = config_from(&[(CURRENCY_SYMBOL_VAR, "  ")]);
        assert_eq!(config.currency_symbol, "$");
    }

    #[test]
    fn test_currency_format_uses_symbol() {
        let config = config_from(&[(CURRENCY_SYMBOL_VAR, "€")]);
        assert_eq!(config.currency_format(), CurrencyFormat::new("€"));
    }
}
