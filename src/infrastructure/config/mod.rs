use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

/// Settings for message rendering and campaign pacing.
///
/// Layered at startup: built-in defaults, then an optional `zapsender.toml`
/// next to the app data dir, then `ZAPSENDER_*` environment overrides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SenderSettings {
    /// Country code prefixed to phones that lack a leading '+'
    pub country_code: String,

    /// Placeholder token replaced with the contact name in templates
    pub placeholder: String,

    /// Delay between automatic sends, in seconds
    pub auto_delay_secs: u64,

    /// Base of the click-to-chat deep link
    pub base_url: String,
}

impl Default for SenderSettings {
    fn default() -> Self {
        Self {
            country_code: "55".to_string(),
            placeholder: "{nome}".to_string(),
            auto_delay_secs: 5,
            base_url: "https://wa.me".to_string(),
        }
    }
}

impl SenderSettings {
    /// Load settings, merging an optional TOML file and env overrides on top
    /// of the defaults
    pub fn load(config_dir: &Path) -> Result<Self> {
        Figment::from(Serialized::defaults(SenderSettings::default()))
            .merge(Toml::file(config_dir.join("zapsender.toml")))
            .merge(Env::prefixed("ZAPSENDER_"))
            .extract()
            .map_err(|e| AppError::ValidationError(format!("Invalid settings: {}", e)))
    }

    /// Validate user-supplied updates before swapping them in
    pub fn validate(&self) -> Result<()> {
        if self.country_code.is_empty() || !self.country_code.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::ValidationError(format!(
                "Country code must be digits only, got '{}'",
                self.country_code
            )));
        }
        if self.placeholder.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Placeholder token must not be empty".to_string(),
            ));
        }
        if self.base_url.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Base URL must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = SenderSettings::default();
        assert_eq!(settings.country_code, "55");
        assert_eq!(settings.placeholder, "{nome}");
        assert_eq!(settings.auto_delay_secs, 5);
        assert_eq!(settings.base_url, "https://wa.me");
    }

    #[test]
    fn test_load_without_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = SenderSettings::load(dir.path()).unwrap();
        assert_eq!(settings, SenderSettings::default());
    }

    #[test]
    fn test_toml_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("zapsender.toml")).unwrap();
        writeln!(file, "country_code = \"351\"\nauto_delay_secs = 10").unwrap();

        let settings = SenderSettings::load(dir.path()).unwrap();
        assert_eq!(settings.country_code, "351");
        assert_eq!(settings.auto_delay_secs, 10);
        // Untouched keys keep their defaults
        assert_eq!(settings.placeholder, "{nome}");
    }

    #[test]
    fn test_validate_rejects_bad_country_code() {
        let settings = SenderSettings {
            country_code: "+55".to_string(),
            ..SenderSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_placeholder() {
        let settings = SenderSettings {
            placeholder: "  ".to_string(),
            ..SenderSettings::default()
        };
        assert!(settings.validate().is_err());
    }
}
