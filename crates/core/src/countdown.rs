//! Calendar-aware countdown decomposition
//!
//! Days are counted as calendar days in the event's zone, so a day that
//! contains a DST shift still counts as one day. Whatever is left after the
//! whole days is split exactly into hours, minutes and seconds.

use chrono::{DateTime, Days, LocalResult, TimeZone, Utc};
use chrono_tz::Tz;

use crate::models::{CountdownState, EventDefinition};
use crate::timezone::{to_timezone, to_utc};

const SECONDS_PER_DAY: u64 = 86_400;

/// Fixed target a countdown runs towards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    target: DateTime<Utc>,
    zone: Tz,
}

impl Countdown {
    pub fn new(target: DateTime<Utc>, zone: Tz) -> Self {
        Self { target, zone }
    }

    pub fn for_event(event: &EventDefinition) -> Self {
        Self::new(event.instant(), event.zone())
    }

    pub fn target(&self) -> DateTime<Utc> {
        self.target
    }

    /// Remaining time as of `now`, zero at and after the target
    pub fn remaining(&self, now: DateTime<Utc>) -> CountdownState {
        remaining(now, self.target, &self.zone)
    }
}

/// Decompose the time from `now` to `target` into days, hours, minutes, seconds
///
/// # Examples
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use timetraveler_core::countdown::remaining;
///
/// let now = Utc.with_ymd_and_hms(2025, 5, 20, 10, 0, 0).unwrap();
/// let target = now + Duration::days(2) + Duration::seconds(61);
/// let state = remaining(now, target, &chrono_tz::America::Bogota);
/// assert_eq!(state.as_tuple(), (2, 0, 1, 1));
/// ```
pub fn remaining(now: DateTime<Utc>, target: DateTime<Utc>, zone: &Tz) -> CountdownState {
    if now >= target {
        return CountdownState::ZERO;
    }

    let start = to_timezone(&now, zone);
    let end = to_timezone(&target, zone);

    let mut days = (end.date_naive() - start.date_naive()).num_days().max(0);
    let mut anchor = advance_days(now, zone, days);
    while days > 0 && anchor > target {
        days -= 1;
        anchor = advance_days(now, zone, days);
    }

    let mut rest = (target - anchor).num_seconds().max(0).unsigned_abs();

    // A 25-hour fall-back day can leave a full day in the remainder
    while rest >= SECONDS_PER_DAY {
        days += 1;
        rest -= SECONDS_PER_DAY;
    }

    CountdownState {
        days: days.unsigned_abs(),
        hours: rest / 3600,
        minutes: rest % 3600 / 60,
        seconds: rest % 60,
    }
}

/// Same wall-clock time `days` calendar days after `from`, in `zone`
fn advance_days(from: DateTime<Utc>, zone: &Tz, days: i64) -> DateTime<Utc> {
    if days == 0 {
        return from;
    }

    let Some(shifted) = to_timezone(&from, zone)
        .naive_local()
        .checked_add_days(Days::new(days.unsigned_abs()))
    else {
        return from;
    };

    match zone.from_local_datetime(&shifted) {
        LocalResult::Single(local) => to_utc(&local),
        LocalResult::Ambiguous(earliest, _) => to_utc(&earliest),
        // Landed in a DST gap; fall back to exact 24-hour days
        LocalResult::None => from + chrono::Duration::days(days),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn span(days: i64, hours: i64, minutes: i64, seconds: i64) -> Duration {
        Duration::days(days)
            + Duration::hours(hours)
            + Duration::minutes(minutes)
            + Duration::seconds(seconds)
    }

    #[test]
    fn test_remaining_exact_components() {
        let now = Utc.with_ymd_and_hms(2025, 5, 20, 22, 30, 0).unwrap();
        let target = now + span(2, 3, 4, 5);

        let state = remaining(now, target, &chrono_tz::America::Bogota);
        assert_eq!(state.as_tuple(), (2, 3, 4, 5));
    }

    #[test]
    fn test_remaining_when_clock_time_wraps() {
        // Target time of day is earlier than now, so the date difference overshoots
        let now = Utc.with_ymd_and_hms(2025, 5, 20, 23, 0, 0).unwrap();
        let target = Utc.with_ymd_and_hms(2025, 5, 23, 1, 0, 0).unwrap();

        let state = remaining(now, target, &Tz::UTC);
        assert_eq!(state.as_tuple(), (2, 2, 0, 0));
    }

    #[test]
    fn test_remaining_is_zero_at_and_after_target() {
        let target = Utc.with_ymd_and_hms(2025, 5, 27, 0, 0, 0).unwrap();

        assert!(remaining(target, target, &Tz::UTC).is_zero());
        assert!(remaining(target + Duration::days(400), target, &Tz::UTC).is_zero());
    }

    #[test]
    fn test_remaining_truncates_subsecond() {
        let now = Utc.with_ymd_and_hms(2025, 5, 27, 0, 0, 0).unwrap();
        let target = now + Duration::milliseconds(1_999);

        assert_eq!(remaining(now, target, &Tz::UTC).as_tuple(), (0, 0, 0, 1));
    }

    #[test]
    fn test_remaining_counts_dst_day_as_calendar_day() {
        // 2025-03-09 in New York is only 23 hours long
        let zone = chrono_tz::America::New_York;
        let now = to_utc(&zone.with_ymd_and_hms(2025, 3, 8, 12, 0, 0).unwrap());
        let target = to_utc(&zone.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap());

        assert_eq!((target - now).num_hours(), 47);
        assert_eq!(remaining(now, target, &zone).as_tuple(), (2, 0, 0, 0));
        // Plain modulo arithmetic would report one day and 23 hours
        assert_eq!(remaining(now, target, &Tz::UTC).as_tuple(), (1, 23, 0, 0));
    }

    #[test]
    fn test_remaining_hours_stay_below_a_day_across_fall_back() {
        // 2025-11-02 in New York is 25 hours long
        let zone = chrono_tz::America::New_York;
        let now = to_utc(&zone.with_ymd_and_hms(2025, 11, 1, 23, 30, 0).unwrap());
        let target = to_utc(&zone.with_ymd_and_hms(2025, 11, 2, 23, 0, 0).unwrap());

        assert_eq!((target - now).num_minutes(), 24 * 60 + 30);
        let state = remaining(now, target, &zone);
        assert_eq!(state.as_tuple(), (1, 0, 30, 0));
        assert!(state.hours < 24);
    }

    #[test]
    fn test_countdown_for_event() {
        let event = EventDefinition::new("2025-05-26T19:00:00", "America/Bogota", "").unwrap();
        let countdown = Countdown::for_event(&event);

        assert_eq!(countdown.target(), event.instant());
        let now = event.instant() - span(0, 0, 10, 0);
        assert_eq!(countdown.remaining(now).as_tuple(), (0, 0, 10, 0));
    }
}
