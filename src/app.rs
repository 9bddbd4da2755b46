use std::sync::Arc;

use tauri::Manager;

use crate::interfaces::tauri::{campaign_commands, contact_commands, core_commands};

pub fn run() {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| crate::infrastructure::bootstrap::setup(app))
        .invoke_handler(tauri::generate_handler![
            contact_commands::load_contacts,
            contact_commands::preview_message,
            campaign_commands::campaign_start,
            campaign_commands::campaign_next,
            campaign_commands::campaign_resume,
            campaign_commands::campaign_stop,
            campaign_commands::campaign_status,
            core_commands::get_settings,
            core_commands::update_settings,
            core_commands::get_logs,
            core_commands::add_log_message,
        ])
        .on_window_event(|window, event| {
            if let tauri::WindowEvent::CloseRequested { .. } = event {
                if window.label() != "main" {
                    return;
                }

                // Closing the app cancels any pending automatic send
                if let Some(state) = window
                    .app_handle()
                    .try_state::<Arc<crate::interfaces::tauri::AppState>>()
                {
                    state.auto_advance.lock().unwrap().cancel();
                }
            }
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
