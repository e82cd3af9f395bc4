//! Configuration for timezone detection
//!
//! Loads configuration from environment variables

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;
use url::Url;

pub const DEFAULT_GEOLOCATION_URL: &str = "https://ipapi.co/json/";

/// Detector configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether to ask the geolocation service before the local environment
    pub geolocation_enabled: bool,

    /// Endpoint answering with a JSON `timezone` field
    pub geolocation_url: Url,

    /// Request timeout in seconds
    pub geolocation_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            geolocation_enabled: env::var("GEOLOCATION_ENABLED")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),

            geolocation_url: env::var("GEOLOCATION_URL")
                .unwrap_or_else(|_| DEFAULT_GEOLOCATION_URL.to_string())
                .parse()
                .context("GEOLOCATION_URL must be a valid URL")?,

            geolocation_timeout_secs: env::var("GEOLOCATION_TIMEOUT_SECS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("GEOLOCATION_TIMEOUT_SECS must be a valid integer")?,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.geolocation_timeout_secs)
    }
}
