//! Timezone of the local environment

use timetraveler_core::parse_timezone;

/// Fallback source for the viewer's timezone
pub trait LocalZoneSource: Send + Sync {
    /// Resolved default zone, `None` when nothing usable is available
    fn local_timezone(&self) -> Option<String>;
}

impl<F> LocalZoneSource for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn local_timezone(&self) -> Option<String> {
        self()
    }
}

/// The operating system's zone, with `TZ` taking precedence
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemZoneSource;

impl LocalZoneSource for SystemZoneSource {
    fn local_timezone(&self) -> Option<String> {
        if let Some(zone) = std::env::var("TZ").ok().as_deref().and_then(zone_from_tz_var) {
            return Some(zone);
        }

        match iana_time_zone::get_timezone() {
            Ok(tz) if !tz.trim().is_empty() => Some(tz.trim().to_string()),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("Could not resolve system timezone: {}", e);
                None
            }
        }
    }
}

/// IANA name carried by a `TZ` value, if any
///
/// Accepts `Europe/Madrid`, `:Europe/Madrid` and zoneinfo paths such as
/// `:/usr/share/zoneinfo/Europe/Madrid`. POSIX rules (`CET-1CEST`) and bare
/// paths like `/etc/localtime` yield `None`.
fn zone_from_tz_var(value: &str) -> Option<String> {
    let value = value.trim().trim_start_matches(':');
    let name = value
        .rsplit_once("zoneinfo/")
        .map_or(value, |(_, name)| name);

    if name.is_empty() {
        return None;
    }

    match parse_timezone(name) {
        Ok(tz) => Some(tz.name().to_string()),
        Err(_) => {
            tracing::debug!(tz = value, "Ignoring TZ value that is not an IANA zone");
            None
        }
    }
}
