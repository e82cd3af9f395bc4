use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use timetraveler_core::config::CoreConfig;

/// How the shell prints the view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => anyhow::bail!("unknown output format '{}'", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UnifiedConfig {
    pub core: CoreConfig,
    pub detector: detector::Config,
    pub view: view::Config,
    pub output: OutputFormat,
}

impl UnifiedConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            core: CoreConfig::from_env()?,
            detector: detector::Config::from_env()?,
            view: view::Config::from_env()?,
            output: env::var("OUTPUT_FORMAT")
                .unwrap_or_else(|_| "text".into())
                .parse()
                .context("OUTPUT_FORMAT must be 'text' or 'json'")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!(" JSON ".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("html".parse::<OutputFormat>().is_err());
    }

    #[test]
    #[serial]
    fn test_unified_config_from_env() {
        unsafe {
            env::set_var("OUTPUT_FORMAT", "json");
            env::set_var("GEOLOCATION_ENABLED", "false");
        }

        let config = UnifiedConfig::from_env().unwrap();
        assert_eq!(config.output, OutputFormat::Json);
        assert!(!config.detector.geolocation_enabled);
        assert_eq!(config.view.countdown_tick_millis, 1000);

        unsafe {
            env::remove_var("OUTPUT_FORMAT");
            env::remove_var("GEOLOCATION_ENABLED");
        }
    }
}
