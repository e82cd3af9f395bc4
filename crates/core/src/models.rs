//! Core domain models for Time Traveler
//!
//! Everything here is recomputed per view; nothing is persisted.

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{EventTimeError, EventTimeResult};
use crate::timezone::{parse_timezone, to_utc};

/// Wall-clock layouts accepted for the event start
const WALL_CLOCK_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Parse wall-clock digits that carry no zone (e.g. "2025-05-26T19:00:00")
pub fn parse_wall_clock(input: &str) -> EventTimeResult<NaiveDateTime> {
    let input = input.trim();
    WALL_CLOCK_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .ok_or_else(|| EventTimeError::InvalidEventTime(format!("unparseable wall clock '{input}'")))
}

/// The event being advertised
///
/// The wall clock is always interpreted in the event's own zone, never as UTC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDefinition {
    wall_clock: NaiveDateTime,
    zone: Tz,
    label: String,
    cta_url: Option<String>,
    instant: DateTime<Utc>,
}

impl EventDefinition {
    /// Build an event from its wall-clock string and IANA zone
    ///
    /// # Examples
    ///
    /// ```
    /// use timetraveler_core::models::EventDefinition;
    ///
    /// let event = EventDefinition::new(
    ///     "2025-05-26T19:00:00",
    ///     "America/Bogota",
    ///     "Lunes 26 de Mayo de 2025, 7:00 PM",
    /// )
    /// .unwrap();
    /// assert_eq!(event.instant().to_rfc3339(), "2025-05-27T00:00:00+00:00");
    /// ```
    pub fn new(wall_clock: &str, zone: &str, label: impl Into<String>) -> EventTimeResult<Self> {
        let zone = parse_timezone(zone)?;
        Self::from_parts(parse_wall_clock(wall_clock)?, zone, label)
    }

    /// Build an event from already parsed parts
    ///
    /// Fails when the wall clock falls in a DST gap or fold of `zone`, since it
    /// would not name exactly one instant.
    pub fn from_parts(
        wall_clock: NaiveDateTime,
        zone: Tz,
        label: impl Into<String>,
    ) -> EventTimeResult<Self> {
        let instant = match zone.from_local_datetime(&wall_clock) {
            LocalResult::Single(local) => to_utc(&local),
            LocalResult::Ambiguous(_, _) => {
                return Err(EventTimeError::InvalidEventTime(format!(
                    "{wall_clock} is ambiguous in {}",
                    zone.name()
                )));
            }
            LocalResult::None => {
                return Err(EventTimeError::InvalidEventTime(format!(
                    "{wall_clock} does not exist in {}",
                    zone.name()
                )));
            }
        };

        Ok(Self {
            wall_clock,
            zone,
            label: label.into(),
            cta_url: None,
            instant,
        })
    }

    /// Attach a call-to-action link
    pub fn with_cta_url(mut self, url: impl Into<String>) -> Self {
        self.cta_url = Some(url.into());
        self
    }

    pub fn wall_clock(&self) -> NaiveDateTime {
        self.wall_clock
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn cta_url(&self) -> Option<&str> {
        self.cta_url.as_deref()
    }

    /// Absolute start of the event
    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }
}

/// How the viewer's timezone was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Reported by the IP-geolocation service
    Ip,
    /// Resolved from the local environment
    Browser,
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provenance::Ip => write!(f, "ip"),
            Provenance::Browser => write!(f, "browser"),
        }
    }
}

/// Viewer timezone as detected, not yet validated against the tz database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedTimezone {
    pub zone: String,
    pub provenance: Provenance,
}

impl DetectedTimezone {
    pub fn new(zone: impl Into<String>, provenance: Provenance) -> Self {
        Self {
            zone: zone.into(),
            provenance,
        }
    }
}

/// Remaining time until the event, clamped at zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownState {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl CountdownState {
    pub const ZERO: Self = Self {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    pub fn new(days: u64, hours: u64, minutes: u64, seconds: u64) -> Self {
        Self {
            days,
            hours,
            minutes,
            seconds,
        }
    }

    /// True once the target has been reached
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    pub fn as_tuple(&self) -> (u64, u64, u64, u64) {
        (self.days, self.hours, self.minutes, self.seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn test_parse_wall_clock_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 5, 26)
            .unwrap()
            .and_hms_opt(19, 0, 0)
            .unwrap();

        assert_eq!(parse_wall_clock("2025-05-26T19:00:00").unwrap(), expected);
        assert_eq!(parse_wall_clock("2025-05-26T19:00").unwrap(), expected);
        assert_eq!(parse_wall_clock("2025-05-26 19:00:00").unwrap(), expected);
        assert!(parse_wall_clock("26/05/2025 19:00").is_err());
    }

    #[test]
    fn test_event_is_zone_qualified() {
        let bogota = EventDefinition::new("2025-05-26T19:00:00", "America/Bogota", "x").unwrap();
        let madrid = EventDefinition::new("2025-05-26T19:00:00", "Europe/Madrid", "x").unwrap();

        // Same digits, different instants
        assert_eq!(bogota.instant().hour(), 0);
        assert_eq!(madrid.instant().hour(), 17);
        assert_ne!(bogota.instant(), madrid.instant());
    }

    #[test]
    fn test_event_rejects_unknown_zone() {
        let result = EventDefinition::new("2025-05-26T19:00:00", "Fake/Zone", "x");
        assert_eq!(
            result,
            Err(EventTimeError::InvalidTimezone("Fake/Zone".to_string()))
        );
    }

    #[test]
    fn test_event_rejects_dst_gap_and_fold() {
        // Clocks jump from 02:00 to 03:00 on 2025-03-09 in New York
        let gap = EventDefinition::new("2025-03-09T02:30:00", "America/New_York", "x");
        assert!(matches!(gap, Err(EventTimeError::InvalidEventTime(_))));

        // 01:30 happens twice on 2025-11-02
        let fold = EventDefinition::new("2025-11-02T01:30:00", "America/New_York", "x");
        assert!(matches!(fold, Err(EventTimeError::InvalidEventTime(_))));
    }

    #[test]
    fn test_event_cta_url() {
        let event = EventDefinition::new("2025-05-26T19:00:00", "America/Bogota", "x").unwrap();
        assert_eq!(event.cta_url(), None);

        let event = event.with_cta_url("https://example.com/join");
        assert_eq!(event.cta_url(), Some("https://example.com/join"));
    }

    #[test]
    fn test_provenance_serialization() {
        let detected = DetectedTimezone::new("Europe/Madrid", Provenance::Browser);
        let json = serde_json::to_value(&detected).unwrap();
        assert_eq!(json["zone"], "Europe/Madrid");
        assert_eq!(json["provenance"], "browser");
        assert_eq!(Provenance::Ip.to_string(), "ip");
    }

    #[test]
    fn test_countdown_state_zero() {
        assert!(CountdownState::ZERO.is_zero());
        assert!(CountdownState::default().is_zero());
        assert!(!CountdownState::new(0, 0, 0, 1).is_zero());
        assert_eq!(CountdownState::new(2, 3, 4, 5).as_tuple(), (2, 3, 4, 5));
    }
}
