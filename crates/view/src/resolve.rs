//! Detection-then-conversion pipeline
//!
//! Every error is caught here and turned into the single user-facing
//! message; nothing propagates past this boundary.

use serde::Serialize;
use timetraveler_core::{
    ConvertedTime, DetectedTimezone, EventDefinition, EventTimeError, EventTimeResult, Locale,
    convert,
};
use tracing::error;

/// What the local-time section of the view shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ViewState {
    Loading,
    Ready(ResolvedTime),
    Failed {
        message: String,
        #[serde(skip)]
        error: EventTimeError,
    },
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }
}

/// Viewer zone together with the event converted into it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedTime {
    pub detected: DetectedTimezone,
    pub converted: ConvertedTime,
}

/// Turn a detection outcome into the state to display
pub fn resolve(
    event: &EventDefinition,
    detection: EventTimeResult<DetectedTimezone>,
    locale: Locale,
) -> ViewState {
    let resolved = detection.and_then(|detected| {
        let converted = convert(event, &detected.zone, locale)?;
        Ok(ResolvedTime {
            detected,
            converted,
        })
    });

    match resolved {
        Ok(resolved) => ViewState::Ready(resolved),
        Err(e) => {
            error!("Error detecting timezone or calculating time: {}", e);
            ViewState::Failed {
                message: locale.error_message().to_string(),
                error: e,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use timetraveler_core::Provenance;

    fn event() -> EventDefinition {
        EventDefinition::new("2025-05-26T19:00:00", "America/Bogota", "").unwrap()
    }

    #[test]
    fn test_resolve_ready() {
        let detected = DetectedTimezone::new("America/New_York", Provenance::Ip);
        let state = resolve(&event(), Ok(detected.clone()), Locale::Es);

        let ViewState::Ready(resolved) = state else {
            panic!("expected ready state");
        };
        assert_eq!(resolved.detected, detected);
        assert_eq!(resolved.converted.offset.hours, 1.0);
    }

    #[test]
    fn test_resolve_invalid_zone_is_failure() {
        let detected = DetectedTimezone::new("Fake/Zone", Provenance::Ip);
        let state = resolve(&event(), Ok(detected), Locale::Es);

        assert_eq!(
            state,
            ViewState::Failed {
                message: Locale::Es.error_message().to_string(),
                error: EventTimeError::InvalidTimezone("Fake/Zone".to_string()),
            }
        );
    }

    #[test]
    fn test_resolve_detection_failure() {
        let state = resolve(
            &event(),
            Err(EventTimeError::Detection("nothing".to_string())),
            Locale::En,
        );

        let ViewState::Failed { message, error } = state else {
            panic!("expected failed state");
        };
        assert_eq!(message, Locale::En.error_message());
        assert!(matches!(error, EventTimeError::Detection(_)));
    }

    #[test]
    fn test_view_state_json_shape() {
        let state = resolve(
            &event(),
            Ok(DetectedTimezone::new("America/Bogota", Provenance::Browser)),
            Locale::Es,
        );
        let json = serde_json::to_value(&state).unwrap();

        assert_eq!(json["status"], "ready");
        assert_eq!(json["detected"]["provenance"], "browser");
        assert_eq!(json["converted"]["offset"]["sentence"], "misma zona horaria");

        let failed = resolve(&event(), Err(EventTimeError::Detection(String::new())), Locale::Es);
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["status"], "failed");
        assert!(json.get("error").is_none());
    }
}
