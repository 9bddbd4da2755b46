//! Message/Link Builder
//!
//! Renders the user's template for one contact and assembles the
//! click-to-chat deep link:
//! - every occurrence of the placeholder token becomes the contact name
//! - the rendered text is percent-encoded (space -> %20, '!' -> %21, ...)
//! - phones without a leading '+' gain the default country code

use serde::{Deserialize, Serialize};

use crate::domain::contact::Contact;
use crate::domain::error::{AppError, Result};
use crate::infrastructure::config::SenderSettings;

/// A message rendered for one contact, ready to open
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedMessage {
    /// Template with the placeholder substituted
    pub text: String,

    /// Phone in international form, with leading '+'
    pub phone: String,

    /// Full click-to-chat URL
    pub url: String,
}

pub struct MessageBuilder {
    settings: SenderSettings,
}

impl MessageBuilder {
    pub fn new(settings: SenderSettings) -> Self {
        Self { settings }
    }

    /// Render the template for a contact and build the deep link
    pub fn build(&self, template: &str, contact: &Contact) -> Result<RenderedMessage> {
        if template.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Message template must not be empty".to_string(),
            ));
        }

        let text = template.replace(&self.settings.placeholder, &contact.name);
        let phone = self.international_phone(contact);
        let encoded = urlencoding::encode(&text);

        let url = format!(
            "{}/{}?text={}",
            self.settings.base_url.trim_end_matches('/'),
            phone.trim_start_matches('+'),
            encoded
        );

        Ok(RenderedMessage { text, phone, url })
    }

    /// Prefix the default country code when the phone carries none
    fn international_phone(&self, contact: &Contact) -> String {
        if contact.has_country_code() {
            contact.phone.clone()
        } else {
            format!("+{}{}", self.settings.country_code, contact.phone)
        }
    }
}
