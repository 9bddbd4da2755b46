use std::sync::Arc;

use tauri::State;

use crate::domain::error::Result;
use crate::infrastructure::config::SenderSettings;
use crate::interfaces::tauri::logging::{add_log, LogEntry};
use crate::interfaces::tauri::AppState;

#[tauri::command]
pub async fn get_settings(state: State<'_, Arc<AppState>>) -> Result<SenderSettings> {
    Ok(state.settings.lock().unwrap().clone())
}

#[tauri::command]
pub async fn update_settings(
    state: State<'_, Arc<AppState>>,
    settings: SenderSettings,
) -> Result<SenderSettings> {
    settings.validate()?;

    *state.settings.lock().unwrap() = settings.clone();

    add_log(
        &state.logs,
        "INFO",
        "Settings",
        &format!(
            "Settings updated: country code {}, delay {}s",
            settings.country_code, settings.auto_delay_secs
        ),
    );

    Ok(settings)
}

#[tauri::command]
pub async fn get_logs(state: State<'_, Arc<AppState>>) -> Result<Vec<LogEntry>> {
    Ok(state.logs.lock().unwrap().clone())
}

#[tauri::command]
pub async fn add_log_message(
    state: State<'_, Arc<AppState>>,
    level: String,
    source: String,
    message: String,
) -> Result<()> {
    add_log(&state.logs, &level, &source, &message);
    Ok(())
}
