//! Time source for the countdown

use chrono::{DateTime, TimeDelta, Utc};
use tokio::time::Instant;

/// Supplies "now" to the countdown
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock reading taken once, then advanced by tokio's monotonic clock
///
/// Immune to wall-clock adjustments while a view is mounted, and follows
/// tokio's paused time in tests.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: DateTime<Utc>,
    anchor: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::anchored_at(Utc::now())
    }

    pub fn anchored_at(start: DateTime<Utc>) -> Self {
        Self {
            start,
            anchor: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> DateTime<Utc> {
        TimeDelta::from_std(self.anchor.elapsed())
            .ok()
            .and_then(|elapsed| self.start.checked_add_signed(elapsed))
            .unwrap_or(self.start)
    }
}
