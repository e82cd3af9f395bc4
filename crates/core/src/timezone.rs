//! Timezone handling utilities
//!
//! Parsing of IANA identifiers, instant conversion and UTC offsets.

use chrono::{DateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{EventTimeError, EventTimeResult};

/// Parse an IANA timezone string (e.g., "America/Bogota", "Europe/Madrid")
///
/// Surrounding whitespace is ignored; anything else the tz database does not
/// know is rejected.
///
/// # Examples
///
/// ```
/// use timetraveler_core::timezone::parse_timezone;
///
/// let tz = parse_timezone("America/Bogota").unwrap();
/// assert_eq!(tz.name(), "America/Bogota");
/// ```
pub fn parse_timezone(tz_str: &str) -> EventTimeResult<Tz> {
    tz_str
        .trim()
        .parse::<Tz>()
        .map_err(|_| EventTimeError::InvalidTimezone(tz_str.to_string()))
}

/// Re-express an absolute instant in a specific timezone
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Timelike, Utc};
/// use timetraveler_core::timezone::{parse_timezone, to_timezone};
///
/// let instant = Utc.with_ymd_and_hms(2025, 5, 27, 0, 0, 0).unwrap();
/// let bogota = parse_timezone("America/Bogota").unwrap();
/// assert_eq!(to_timezone(&instant, &bogota).hour(), 19);
/// ```
pub fn to_timezone<Tz2: TimeZone>(utc_time: &DateTime<Utc>, tz: &Tz2) -> DateTime<Tz2> {
    utc_time.with_timezone(tz)
}

/// Convert a timezone-aware time to UTC
pub fn to_utc<Tz2: TimeZone>(time: &DateTime<Tz2>) -> DateTime<Utc> {
    time.with_timezone(&Utc)
}

/// Hours east of UTC for `tz` at `instant`
///
/// Fractional for half- and quarter-hour zones (e.g. `5.75` for
/// Asia/Kathmandu). DST is taken into account, so the same zone can yield
/// different values at different instants.
pub fn offset_hours(tz: &Tz, instant: &DateTime<Utc>) -> f64 {
    let seconds = tz
        .offset_from_utc_datetime(&instant.naive_utc())
        .fix()
        .local_minus_utc();
    f64::from(seconds) / 3600.0
}

/// Validate that a timezone string is valid
///
/// Returns `Ok(())` if valid, `Err` otherwise
pub fn validate_timezone(tz_str: &str) -> EventTimeResult<()> {
    parse_timezone(tz_str)?;
    Ok(())
}
