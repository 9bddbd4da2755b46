//! Contact Commands
//!
//! Loading and previewing: the file path arrives from the frontend's
//! file-picker dialog (tauri-plugin-dialog); the backend never opens a
//! picker itself.

use std::path::Path;
use std::sync::Arc;

use tauri::State;

use crate::application::{ContactLoader, MessageBuilder};
use crate::application::use_cases::message_builder::RenderedMessage;
use crate::domain::error::{AppError, Result};
use crate::interfaces::tauri::logging::add_log;
use crate::interfaces::tauri::types::{LoadContactsResponse, PreviewMessageRequest};
use crate::interfaces::tauri::AppState;

#[tauri::command]
pub async fn load_contacts(
    state: State<'_, Arc<AppState>>,
    file_path: String,
) -> Result<LoadContactsResponse> {
    add_log(
        &state.logs,
        "INFO",
        "Contacts",
        &format!("Loading spreadsheet: {}", file_path),
    );

    let book = ContactLoader::load(Path::new(&file_path)).map_err(|e| {
        add_log(
            &state.logs,
            "ERROR",
            "Contacts",
            &format!("Failed to load spreadsheet: {}", e),
        );
        e
    })?;

    // Only touch state after a successful load: a bad spreadsheet leaves
    // the previous contact list and campaign untouched.
    state.auto_advance.lock().unwrap().cancel();
    state.campaign.lock().unwrap().reset();

    let response = LoadContactsResponse {
        source_path: book.source_path.clone(),
        count: book.len(),
        contacts: book.contacts.clone(),
    };

    *state.contact_book.lock().unwrap() = Some(book);

    add_log(
        &state.logs,
        "INFO",
        "Contacts",
        &format!("{} contacts loaded", response.count),
    );

    Ok(response)
}

/// Render a message for one contact without touching campaign state
#[tauri::command]
pub async fn preview_message(
    state: State<'_, Arc<AppState>>,
    request: PreviewMessageRequest,
) -> Result<RenderedMessage> {
    let book = state
        .contact_book
        .lock()
        .unwrap()
        .clone()
        .ok_or_else(|| AppError::NotFound("No spreadsheet loaded".to_string()))?;

    let contact = book
        .get(request.index)
        .ok_or_else(|| AppError::NotFound(format!("No contact at index {}", request.index)))?;

    let builder = MessageBuilder::new(state.settings.lock().unwrap().clone());
    builder.build(&request.template, contact)
}
