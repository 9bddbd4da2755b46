use serde::{Deserialize, Serialize};

use crate::domain::contact::Contact;

#[derive(Debug, Clone, Deserialize)]
pub struct StartCampaignRequest {
    pub template: String,
    /// Advance automatically on a timer instead of per button press
    #[serde(default)]
    pub auto: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreviewMessageRequest {
    pub template: String,
    /// Index into the loaded contact book
    pub index: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadContactsResponse {
    pub source_path: String,
    pub count: usize,
    pub contacts: Vec<Contact>,
}
