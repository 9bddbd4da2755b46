use std::sync::{Arc, Mutex};

use crate::application::use_cases::auto_advance::AutoAdvance;
use crate::application::CampaignRunner;
use crate::domain::contact::ContactBook;
use crate::infrastructure::config::SenderSettings;
use crate::infrastructure::opener::LinkOpener;
use crate::interfaces::tauri::logging::{new_log_buffer, LogBuffer};

/// All mutable application state, owned here instead of scattered over
/// the widget tree. Touched only from command handlers and the scheduled
/// auto-advance action, each of which locks for the duration of one
/// state transition.
pub struct AppState {
    /// Currently loaded contacts; replaced wholesale on each load
    pub contact_book: Mutex<Option<ContactBook>>,

    /// Campaign phase machine and cursor
    pub campaign: Mutex<CampaignRunner>,

    /// Message/link settings (country code, placeholder, pacing)
    pub settings: Mutex<SenderSettings>,

    /// Pending auto-advance action, if any
    pub auto_advance: Mutex<AutoAdvance>,

    /// Browser-opening seam
    pub opener: Arc<dyn LinkOpener>,

    /// In-app log panel buffer
    pub logs: LogBuffer,
}

impl AppState {
    pub fn new(opener: Arc<dyn LinkOpener>, settings: SenderSettings) -> Self {
        Self {
            contact_book: Mutex::new(None),
            campaign: Mutex::new(CampaignRunner::new()),
            settings: Mutex::new(settings),
            auto_advance: Mutex::new(AutoAdvance::new()),
            opener,
            logs: new_log_buffer(),
        }
    }
}
