use tauri_plugin_opener::OpenerExt;
use url::Url;

use crate::domain::error::{AppError, Result};

/// Seam for opening a click-to-chat link in the user's default browser.
///
/// Commands talk to this trait so campaign logic stays testable without a
/// running webview.
pub trait LinkOpener: Send + Sync {
    fn open(&self, url: &str) -> Result<()>;
}

/// Production opener backed by tauri-plugin-opener
pub struct TauriOpener<R: tauri::Runtime> {
    app: tauri::AppHandle<R>,
}

impl<R: tauri::Runtime> TauriOpener<R> {
    pub fn new(app: tauri::AppHandle<R>) -> Self {
        Self { app }
    }
}

impl<R: tauri::Runtime> LinkOpener for TauriOpener<R> {
    fn open(&self, url: &str) -> Result<()> {
        validate_https(url)?;

        self.app
            .opener()
            .open_url(url, None::<&str>)
            .map_err(|e| AppError::SendError(format!("Failed to open {}: {}", url, e)))
    }
}

/// Only ever hand https links to the OS
fn validate_https(url: &str) -> Result<()> {
    let parsed = Url::parse(url)
        .map_err(|e| AppError::SendError(format!("Invalid URL '{}': {}", url, e)))?;

    if parsed.scheme() != "https" {
        return Err(AppError::SendError(format!(
            "Refusing to open non-https URL '{}'",
            url
        )));
    }
    Ok(())
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Records opened URLs instead of launching a browser
    pub struct RecordingOpener {
        pub opened: Mutex<Vec<String>>,
        pub fail: bool,
    }

    impl RecordingOpener {
        pub fn new() -> Self {
            Self {
                opened: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        pub fn failing() -> Self {
            Self {
                opened: Mutex::new(Vec::new()),
                fail: true,
            }
        }
    }

    impl LinkOpener for RecordingOpener {
        fn open(&self, url: &str) -> Result<()> {
            validate_https(url)?;
            if self.fail {
                return Err(AppError::SendError(format!("Failed to open {}", url)));
            }
            self.opened.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_https_accepts_wa_me() {
        assert!(validate_https("https://wa.me/5511999990000?text=Oi").is_ok());
    }

    #[test]
    fn test_validate_https_rejects_other_schemes() {
        assert!(validate_https("http://wa.me/5511999990000").is_err());
        assert!(validate_https("file:///etc/passwd").is_err());
        assert!(validate_https("not a url").is_err());
    }
}
