//! Shared configuration logic
//!
//! Handles loading of the event definition and display settings from the
//! environment.

use crate::error::{ConfigError, EventTimeResult};
use crate::locale::Locale;
use crate::models::EventDefinition;
use crate::timezone::validate_timezone;
use std::env;

pub const DEFAULT_EVENT_START: &str = "2025-05-26T19:00:00";
pub const DEFAULT_EVENT_TIMEZONE: &str = "America/Bogota";
pub const DEFAULT_EVENT_LABEL: &str = "Lunes 26 de Mayo de 2025, 7:00 PM";

/// Common configuration used across crates
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Event wall clock without zone (default: 2025-05-26T19:00:00)
    pub event_start: String,

    /// Authoritative IANA zone of the event (default: America/Bogota)
    pub event_timezone: String,

    /// Pre-formatted label shown as the original time
    pub event_label: String,

    /// Optional call-to-action link
    pub cta_url: Option<String>,

    /// Display language (default: es)
    pub locale: Locale,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            event_start: DEFAULT_EVENT_START.to_string(),
            event_timezone: DEFAULT_EVENT_TIMEZONE.to_string(),
            event_label: DEFAULT_EVENT_LABEL.to_string(),
            cta_url: None,
            locale: Locale::default(),
        }
    }
}

impl CoreConfig {
    /// Load common configuration from environment variables
    ///
    /// This will also initialize dotenv if it hasn't been done yet.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let event_timezone =
            env::var("EVENT_TIMEZONE").unwrap_or_else(|_| DEFAULT_EVENT_TIMEZONE.to_string());
        validate_timezone(&event_timezone).map_err(|_| ConfigError::InvalidValue {
            name: "EVENT_TIMEZONE".to_string(),
            value: event_timezone.clone(),
        })?;

        Ok(Self {
            event_start: env::var("EVENT_START")
                .unwrap_or_else(|_| DEFAULT_EVENT_START.to_string()),
            event_timezone,
            event_label: env::var("EVENT_LABEL")
                .unwrap_or_else(|_| DEFAULT_EVENT_LABEL.to_string()),
            cta_url: env::var("EVENT_CTA_URL").ok().filter(|url| !url.trim().is_empty()),
            locale: env::var("DISPLAY_LOCALE")
                .ok()
                .map(|value| value.parse::<Locale>())
                .transpose()?
                .unwrap_or_default(),
        })
    }

    /// Build the event this configuration describes
    pub fn event_definition(&self) -> EventTimeResult<EventDefinition> {
        let event = EventDefinition::new(&self.event_start, &self.event_timezone, &self.event_label)?;
        Ok(match &self.cta_url {
            Some(url) => event.with_cta_url(url),
            None => event,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn clear_env() {
        unsafe {
            for name in [
                "EVENT_START",
                "EVENT_TIMEZONE",
                "EVENT_LABEL",
                "EVENT_CTA_URL",
                "DISPLAY_LOCALE",
            ] {
                env::remove_var(name);
            }
        }
    }

    #[test]
    #[serial]
    fn test_core_config_defaults() {
        clear_env();

        let config = CoreConfig::from_env().unwrap();
        assert_eq!(config.event_start, DEFAULT_EVENT_START);
        assert_eq!(config.event_timezone, "America/Bogota");
        assert_eq!(config.locale, Locale::Es);
        assert_eq!(config.cta_url, None);

        let event = config.event_definition().unwrap();
        assert_eq!(event.label(), DEFAULT_EVENT_LABEL);
    }

    #[test]
    #[serial]
    fn test_core_config_from_env() {
        clear_env();
        unsafe {
            env::set_var("EVENT_START", "2026-01-10T09:30:00");
            env::set_var("EVENT_TIMEZONE", "Europe/Madrid");
            env::set_var("EVENT_CTA_URL", "https://example.com/clase");
            env::set_var("DISPLAY_LOCALE", "en");
        }

        let config = CoreConfig::from_env().unwrap();
        assert_eq!(config.event_timezone, "Europe/Madrid");
        assert_eq!(config.locale, Locale::En);

        let event = config.event_definition().unwrap();
        assert_eq!(event.zone(), chrono_tz::Europe::Madrid);
        assert_eq!(event.cta_url(), Some("https://example.com/clase"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_core_config_rejects_bad_values() {
        clear_env();
        unsafe {
            env::set_var("EVENT_TIMEZONE", "Fake/Zone");
        }
        assert!(matches!(
            CoreConfig::from_env(),
            Err(ConfigError::InvalidValue { .. })
        ));

        unsafe {
            env::remove_var("EVENT_TIMEZONE");
            env::set_var("DISPLAY_LOCALE", "klingon");
        }
        assert!(CoreConfig::from_env().is_err());

        clear_env();
    }

    #[test]
    fn test_event_definition_reports_bad_start() {
        let config = CoreConfig {
            event_start: "mañana".to_string(),
            ..CoreConfig::default()
        };
        assert!(config.event_definition().is_err());
    }
}
