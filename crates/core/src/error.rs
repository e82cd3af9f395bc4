//! Error types for Time Traveler core domain logic

use thiserror::Error;

/// Errors raised while resolving or converting the event time
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventTimeError {
    #[error("Could not detect a timezone: {0}")]
    Detection(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid event time: {0}")]
    InvalidEventTime(String),
}

/// Result type alias for event time operations
pub type EventTimeResult<T> = Result<T, EventTimeError>;

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}
