mod app;
mod application;
mod domain;
mod infrastructure;
mod interfaces;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    app::run()
}
