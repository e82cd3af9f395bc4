//! Event time conversion into the viewer's timezone

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

use crate::error::EventTimeResult;
use crate::locale::Locale;
use crate::models::EventDefinition;
use crate::timezone::{offset_hours, parse_timezone, to_timezone};

/// Signed distance between the viewer's zone and the event's zone
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OffsetDifference {
    /// Target offset minus event offset, rounded to a tenth of an hour
    pub hours: f64,
    pub sentence: String,
}

impl OffsetDifference {
    pub fn is_same_zone(&self) -> bool {
        self.hours == 0.0
    }
}

/// The event instant as seen from one target zone
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvertedTime {
    pub instant: DateTime<Utc>,
    pub target_zone: String,
    pub local_time: NaiveDateTime,
    pub formatted: String,
    pub offset: OffsetDifference,
}

/// Round to the nearest tenth, mapping `-0.0` to `0.0`
pub fn round_to_tenth(hours: f64) -> f64 {
    let rounded = (hours * 10.0).round() / 10.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Convert `event` into `target_zone`
///
/// Fails with `InvalidTimezone` when `target_zone` is not a known IANA zone; no
/// time is produced in that case.
///
/// # Examples
///
/// ```
/// use timetraveler_core::convert::convert;
/// use timetraveler_core::locale::Locale;
/// use timetraveler_core::models::EventDefinition;
///
/// let event = EventDefinition::new("2025-05-26T19:00:00", "America/Bogota", "").unwrap();
/// let converted = convert(&event, "America/New_York", Locale::Es).unwrap();
/// assert_eq!(converted.offset.sentence, "1 hora adelante");
/// ```
pub fn convert(
    event: &EventDefinition,
    target_zone: &str,
    locale: Locale,
) -> EventTimeResult<ConvertedTime> {
    let target = parse_timezone(target_zone)?;
    let instant = event.instant();
    let local = to_timezone(&instant, &target);

    let hours = round_to_tenth(offset_hours(&target, &instant) - offset_hours(&event.zone(), &instant));

    tracing::debug!(
        event_zone = event.zone().name(),
        target_zone = target.name(),
        offset_hours = hours,
        "Converted event time"
    );

    Ok(ConvertedTime {
        instant,
        target_zone: target.name().to_string(),
        local_time: local.naive_local(),
        formatted: locale.format_long(&local),
        offset: OffsetDifference {
            hours,
            sentence: locale.offset_sentence(hours),
        },
    })
}
