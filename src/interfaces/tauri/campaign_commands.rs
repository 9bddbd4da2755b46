//! Campaign Commands
//!
//! The command dispatch table for a send run. Each command is one state
//! transition on the `CampaignRunner`; opening the browser link and
//! emitting progress events happen here, never inside the runner.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tauri::{AppHandle, Emitter, Manager, State};

use crate::application::use_cases::campaign_runner::SendStep;
use crate::application::{CampaignRunner, MessageBuilder};
use crate::domain::campaign::CampaignStatus;
use crate::domain::contact::ContactBook;
use crate::domain::error::{AppError, Result};
use crate::interfaces::tauri::logging::add_log;
use crate::interfaces::tauri::types::StartCampaignRequest;
use crate::interfaces::tauri::AppState;

/// Emitted to the webview after every send
pub const PROGRESS_EVENT: &str = "campaign://progress";
/// Emitted once the cursor walks past the last contact
pub const FINISHED_EVENT: &str = "campaign://finished";

#[tauri::command]
pub async fn campaign_start(
    app: AppHandle,
    state: State<'_, Arc<AppState>>,
    request: StartCampaignRequest,
) -> Result<SendStep> {
    // A new run always cancels whatever the previous one left pending
    state.auto_advance.lock().unwrap().cancel();

    let book = current_book(&state)?;
    let builder = message_builder(&state);

    let step = state
        .campaign
        .lock()
        .unwrap()
        .start(&request.template, request.auto, &book, &builder)?;

    add_log(
        &state.logs,
        "INFO",
        "Campaign",
        &format!(
            "Campaign started: {} contacts, {} mode",
            book.len(),
            if request.auto { "automatic" } else { "manual" }
        ),
    );

    dispatch_step(&app, &state, &step)?;

    if request.auto {
        schedule_auto_advance(app);
    }

    Ok(step)
}

/// Advance to the next contact; `None` means the run just finished
#[tauri::command]
pub async fn campaign_next(
    app: AppHandle,
    state: State<'_, Arc<AppState>>,
) -> Result<Option<SendStep>> {
    advance_and_send(&app, state.inner())
}

/// Continue a paused run. The contact under the cursor is sent again,
/// so a send that failed gets another chance before the cursor moves.
#[tauri::command]
pub async fn campaign_resume(
    app: AppHandle,
    state: State<'_, Arc<AppState>>,
) -> Result<SendStep> {
    let book = current_book(&state)?;
    let builder = message_builder(&state);

    let step = state.campaign.lock().unwrap().resume(&book, &builder)?;

    add_log(
        &state.logs,
        "INFO",
        "Campaign",
        &format!("Resumed at contact {} of {}", step.index + 1, book.len()),
    );

    dispatch_step(&app, &state, &step)?;

    let auto = state.campaign.lock().unwrap().is_auto();
    if auto {
        schedule_auto_advance(app);
    }

    Ok(step)
}

#[tauri::command]
pub async fn campaign_stop(state: State<'_, Arc<AppState>>) -> Result<CampaignStatus> {
    state.auto_advance.lock().unwrap().cancel();

    let total = book_len(&state);
    let mut runner = state.campaign.lock().unwrap();
    runner.pause();
    let status = runner.status(total);

    add_log(
        &state.logs,
        "INFO",
        "Campaign",
        &format!("Stopped. {} of {} messages sent", status.cursor, status.total),
    );

    Ok(status)
}

#[tauri::command]
pub async fn campaign_status(state: State<'_, Arc<AppState>>) -> Result<CampaignStatus> {
    let total = book_len(&state);
    Ok(state.campaign.lock().unwrap().status(total))
}

fn current_book(state: &AppState) -> Result<ContactBook> {
    state
        .contact_book
        .lock()
        .unwrap()
        .clone()
        .ok_or_else(|| AppError::NotFound("No spreadsheet loaded".to_string()))
}

fn book_len(state: &AppState) -> usize {
    state
        .contact_book
        .lock()
        .unwrap()
        .as_ref()
        .map(|book| book.len())
        .unwrap_or(0)
}

fn message_builder(state: &AppState) -> MessageBuilder {
    MessageBuilder::new(state.settings.lock().unwrap().clone())
}

/// Open the step's link and report progress. A failed open pauses the
/// campaign with the cursor left in place; nothing is retried.
fn dispatch_step(app: &AppHandle, state: &AppState, step: &SendStep) -> Result<()> {
    add_log(
        &state.logs,
        "INFO",
        "Campaign",
        &format!("Sending to: {} ({})", step.contact.name, step.message.phone),
    );

    if let Err(e) = open_step(&state.campaign, state.opener.as_ref(), step) {
        state.auto_advance.lock().unwrap().cancel();
        add_log(
            &state.logs,
            "ERROR",
            "Campaign",
            &format!("Failed to open link for {}: {}", step.contact.name, e),
        );
        return Err(e);
    }

    let _ = app.emit(PROGRESS_EVENT, &step.status);
    Ok(())
}

/// A failed open pauses the run (never aborts it), leaving the cursor in
/// place so the user can resume from the same contact
fn open_step(
    campaign: &Mutex<CampaignRunner>,
    opener: &dyn crate::infrastructure::opener::LinkOpener,
    step: &SendStep,
) -> Result<()> {
    if let Err(e) = opener.open(&step.message.url) {
        campaign.lock().unwrap().pause();
        return Err(e);
    }
    Ok(())
}

fn advance_and_send(app: &AppHandle, state: &Arc<AppState>) -> Result<Option<SendStep>> {
    let book = current_book(state)?;
    let builder = message_builder(state);

    let step = state.campaign.lock().unwrap().advance(&book, &builder)?;

    match step {
        Some(step) => {
            dispatch_step(app, state, &step)?;

            let keep_going = {
                let runner = state.campaign.lock().unwrap();
                runner.is_auto() && runner.phase().is_running()
            };
            if keep_going {
                schedule_auto_advance(app.clone());
            }

            Ok(Some(step))
        }
        None => {
            let status = state.campaign.lock().unwrap().status(book.len());
            add_log(
                &state.logs,
                "INFO",
                "Campaign",
                &format!("Finished! {} messages processed", book.len()),
            );
            let _ = app.emit(FINISHED_EVENT, &status);
            Ok(None)
        }
    }
}

/// Queue the next automatic send as a cancellable delayed action
fn schedule_auto_advance(app: AppHandle) {
    let state = app.state::<Arc<AppState>>().inner().clone();
    let delay = Duration::from_secs(state.settings.lock().unwrap().auto_delay_secs);

    let app_for_task = app.clone();
    let state_for_task = state.clone();

    state.auto_advance.lock().unwrap().schedule(delay, async move {
        // Abort is the fast path; still re-check in case stop raced the timer
        let still_running = {
            let runner = state_for_task.campaign.lock().unwrap();
            runner.is_auto() && runner.phase().is_running()
        };
        if !still_running {
            return;
        }

        if let Err(e) = advance_and_send(&app_for_task, &state_for_task) {
            add_log(
                &state_for_task.logs,
                "ERROR",
                "Campaign",
                &format!("Auto-advance failed: {}", e),
            );
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::campaign::CampaignPhase;
    use crate::domain::contact::Contact;
    use crate::infrastructure::config::SenderSettings;
    use crate::infrastructure::opener::testing::RecordingOpener;

    fn test_book() -> ContactBook {
        ContactBook::new(
            "test.csv".to_string(),
            vec![
                Contact::new("Ana".to_string(), "11999990000".to_string()),
                Contact::new("Bob".to_string(), "11888880000".to_string()),
            ],
        )
    }

    fn setup_run() -> (Mutex<CampaignRunner>, SendStep) {
        let builder = MessageBuilder::new(SenderSettings::default());
        let mut runner = CampaignRunner::new();
        let step = runner
            .start("Oi {nome}", false, &test_book(), &builder)
            .unwrap();
        (Mutex::new(runner), step)
    }

    #[test]
    fn test_open_step_records_url() {
        let (campaign, step) = setup_run();
        let opener = RecordingOpener::new();

        open_step(&campaign, &opener, &step).unwrap();

        let opened = opener.opened.lock().unwrap();
        assert_eq!(opened.len(), 1);
        assert_eq!(opened[0], "https://wa.me/5511999990000?text=Oi%20Ana");
        assert_eq!(campaign.lock().unwrap().phase(), CampaignPhase::Running);
    }

    #[test]
    fn test_failed_open_pauses_with_cursor_in_place() {
        let (campaign, step) = setup_run();
        let opener = RecordingOpener::failing();

        assert!(open_step(&campaign, &opener, &step).is_err());

        let runner = campaign.lock().unwrap();
        assert_eq!(runner.phase(), CampaignPhase::Paused);
        assert_eq!(runner.cursor(), 0);
    }

    #[test]
    fn test_resume_after_failed_open_sends_same_contact() {
        let (campaign, step) = setup_run();

        assert!(open_step(&campaign, &RecordingOpener::failing(), &step).is_err());
        assert_eq!(campaign.lock().unwrap().phase(), CampaignPhase::Paused);

        let builder = MessageBuilder::new(SenderSettings::default());
        let step = campaign
            .lock()
            .unwrap()
            .resume(&test_book(), &builder)
            .unwrap();
        assert_eq!(step.index, 0);
        assert_eq!(step.contact.name, "Ana");

        let opener = RecordingOpener::new();
        open_step(&campaign, &opener, &step).unwrap();
        assert_eq!(
            opener.opened.lock().unwrap()[0],
            "https://wa.me/5511999990000?text=Oi%20Ana"
        );
        assert_eq!(campaign.lock().unwrap().phase(), CampaignPhase::Running);
    }
}
