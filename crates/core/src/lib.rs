//! Time Traveler Core - Event time domain logic
//!
//! This crate contains pure domain logic with no I/O operations:
//! zone-aware conversion, offset differences, countdown decomposition and
//! the display locale.

pub mod config;
pub mod convert;
pub mod countdown;
pub mod error;
pub mod locale;
pub mod models;
pub mod timezone;

pub use convert::{ConvertedTime, OffsetDifference, convert};
pub use countdown::Countdown;
pub use error::{ConfigError, EventTimeError, EventTimeResult};
pub use locale::Locale;
pub use models::{CountdownState, DetectedTimezone, EventDefinition, Provenance};
pub use timezone::{offset_hours, parse_timezone, to_timezone, to_utc, validate_timezone};
