//! Configuration for the view session
//!
//! Loads configuration from environment variables

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// View configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Countdown refresh interval in milliseconds
    pub countdown_tick_millis: u64,

    /// Minimum time the loading state stays visible, in milliseconds
    pub loading_delay_millis: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            countdown_tick_millis: 1000,
            loading_delay_millis: 500,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let countdown_tick_millis: u64 = env::var("COUNTDOWN_TICK_MILLIS")
            .unwrap_or_else(|_| "1000".to_string())
            .parse()
            .context("COUNTDOWN_TICK_MILLIS must be a valid integer")?;
        anyhow::ensure!(
            countdown_tick_millis > 0,
            "COUNTDOWN_TICK_MILLIS must be greater than zero"
        );

        Ok(Self {
            countdown_tick_millis,
            loading_delay_millis: env::var("LOADING_DELAY_MILLIS")
                .unwrap_or_else(|_| "500".to_string())
                .parse()
                .context("LOADING_DELAY_MILLIS must be a valid integer")?,
        })
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.countdown_tick_millis)
    }

    pub fn loading_delay(&self) -> Duration {
        Duration::from_millis(self.loading_delay_millis)
    }
}
