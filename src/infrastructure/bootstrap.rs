use std::error::Error;
use std::sync::Arc;

use tauri::Manager;
use tracing::error;

use crate::infrastructure::config::SenderSettings;
use crate::infrastructure::opener::TauriOpener;
use crate::interfaces::tauri::logging::add_log;
use crate::interfaces::tauri::AppState;

pub fn setup(app: &mut tauri::App) -> Result<(), Box<dyn Error>> {
    let app_handle = app.handle().clone();

    let config_dir = app_handle.path().app_config_dir().map_err(|err| {
        error!(error = %err, "Failed to resolve app config dir");
        err
    })?;

    let settings = SenderSettings::load(&config_dir).map_err(|err| {
        error!(error = %err, "Failed to load settings");
        err
    })?;

    let opener = Arc::new(TauriOpener::new(app_handle.clone()));
    let state = Arc::new(AppState::new(opener, settings));

    add_log(&state.logs, "INFO", "System", "Backend initialized");

    app_handle.manage(state);

    Ok(())
}
