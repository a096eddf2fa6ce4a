//! # Settings Commands
//!
//! The theme preference, persisted in the settings database.

use tauri::State;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::DbState;
use invoice_core::Theme;

/// Gets the saved theme (light when none is saved).
#[tauri::command]
pub async fn get_theme(db: State<'_, DbState>) -> Result<Theme, ApiError> {
    debug!("get_theme command");
    Ok(db.settings().get_theme().await?)
}

/// Saves a theme by name (`light` or `dark`).
#[tauri::command]
pub async fn set_theme(db: State<'_, DbState>, theme: String) -> Result<Theme, ApiError> {
    debug!(theme = %theme, "set_theme command");
    let theme: Theme = theme.parse()?;

    db.settings().set_theme(theme).await?;
    info!(%theme, "Theme saved");
    Ok(theme)
}

/// Saves the theme from the header toggle (checked = dark).
#[tauri::command]
pub async fn toggle_theme(db: State<'_, DbState>, checked: bool) -> Result<Theme, ApiError> {
    debug!(checked, "toggle_theme command");
    let theme = Theme::from_toggle(checked);

    db.settings().set_theme(theme).await?;
    info!(%theme, "Theme saved");
    Ok(theme)
}
