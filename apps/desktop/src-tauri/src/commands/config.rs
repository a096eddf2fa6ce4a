//! # Config Commands

use tauri::State;
use tracing::debug;

use crate::state::ConfigState;

/// Gets the current application configuration.
#[tauri::command]
pub fn get_config(config: State<'_, ConfigState>) -> ConfigState {
    debug!("get_config command");
    (*config).clone()
}
