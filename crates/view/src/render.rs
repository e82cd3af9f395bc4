//! Plain-text and JSON presentation of a view

use serde::Serialize;
use timetraveler_core::{CountdownState, EventDefinition, Locale};

use crate::resolve::ViewState;

/// Everything the rendering shell needs at one moment
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub event_label: &'a str,
    pub event_zone: &'static str,
    pub cta_url: Option<&'a str>,
    pub view: &'a ViewState,
    pub countdown: CountdownState,
}

impl<'a> Snapshot<'a> {
    pub fn new(event: &'a EventDefinition, view: &'a ViewState, countdown: CountdownState) -> Self {
        Self {
            event_label: event.label(),
            event_zone: event.zone().name(),
            cta_url: event.cta_url(),
            view,
            countdown,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Card-style text block; `year` feeds the footer
    pub fn to_text(&self, locale: Locale, year: i32) -> String {
        let mut lines = vec![
            locale.title().to_string(),
            locale.subtitle().to_string(),
            String::new(),
            locale.original_time_heading().to_string(),
            self.event_label.to_string(),
            locale.event_zone_line(self.event_zone),
            String::new(),
            locale.local_time_heading().to_string(),
        ];

        match self.view {
            ViewState::Loading => lines.push(locale.loading().to_string()),
            ViewState::Failed { message, .. } => lines.push(message.clone()),
            ViewState::Ready(resolved) => {
                lines.push(resolved.converted.formatted.clone());
                lines.push(resolved.converted.offset.sentence.clone());
                lines.push(locale.detected_zone_line(
                    &resolved.detected.zone,
                    resolved.detected.provenance == timetraveler_core::Provenance::Ip,
                ));
            }
        }

        lines.push(String::new());
        lines.push(countdown_line(&self.countdown, locale));

        if let Some(url) = self.cta_url {
            lines.push(locale.cta_line(url));
        }

        lines.push(String::new());
        lines.push(locale.footer(year));
        lines.join("\n")
    }
}

/// Countdown line, or the started notice once it reached zero
pub fn countdown_line(state: &CountdownState, locale: Locale) -> String {
    if state.is_zero() {
        locale.event_started().to_string()
    } else {
        locale.countdown_text(state)
    }
}
