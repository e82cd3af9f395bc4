//! Display locale: long-form dates, offset sentences and UI copy

use std::str::FromStr;

use chrono::{DateTime, Datelike, Timelike, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::CountdownState;

/// Supported display languages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl FromStr for Locale {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "es" | "es-co" | "es-es" => Ok(Locale::Es),
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            other => Err(ConfigError::InvalidValue {
                name: "DISPLAY_LOCALE".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

impl Locale {
    pub fn weekday_name(self, weekday: Weekday) -> &'static str {
        let idx = weekday.num_days_from_monday() as usize;
        match self {
            Locale::Es => [
                "Lunes", "Martes", "Miércoles", "Jueves", "Viernes", "Sábado", "Domingo",
            ][idx],
            Locale::En => [
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
                "Sunday",
            ][idx],
        }
    }

    /// Full month name, `month` is 1-based
    pub fn month_name(self, month: u32) -> &'static str {
        let idx = (month.clamp(1, 12) - 1) as usize;
        match self {
            Locale::Es => [
                "Enero",
                "Febrero",
                "Marzo",
                "Abril",
                "Mayo",
                "Junio",
                "Julio",
                "Agosto",
                "Septiembre",
                "Octubre",
                "Noviembre",
                "Diciembre",
            ][idx],
            Locale::En => [
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ][idx],
        }
    }

    /// Long-form rendering with weekday, 12-hour clock and zone abbreviation
    ///
    /// Spanish: `Lunes 26 de Mayo de 2025, 8:00 PM (EDT)`
    /// English: `Monday, May 26, 2025, 8:00 PM (EDT)`
    pub fn format_long(self, local: &DateTime<Tz>) -> String {
        let weekday = self.weekday_name(local.weekday());
        let month = self.month_name(local.month());
        let (is_pm, hour12) = local.hour12();
        let meridiem = if is_pm { "PM" } else { "AM" };
        let abbreviation = local.format("%Z");

        match self {
            Locale::Es => format!(
                "{weekday} {} de {month} de {}, {hour12}:{:02} {meridiem} ({abbreviation})",
                local.day(),
                local.year(),
                local.minute(),
            ),
            Locale::En => format!(
                "{weekday}, {month} {}, {}, {hour12}:{:02} {meridiem} ({abbreviation})",
                local.day(),
                local.year(),
                local.minute(),
            ),
        }
    }

    /// Sentence describing how far the viewer's zone is from the event's
    ///
    /// `hours` is target minus event, already rounded to a tenth.
    pub fn offset_sentence(self, hours: f64) -> String {
        if hours == 0.0 {
            return match self {
                Locale::Es => "misma zona horaria".to_string(),
                Locale::En => "same timezone".to_string(),
            };
        }

        let magnitude = hours.abs();
        let amount = self.format_hours(magnitude);
        let singular = magnitude == 1.0;
        let ahead = hours > 0.0;

        match self {
            Locale::Es => format!(
                "{amount} {} {}",
                if singular { "hora" } else { "horas" },
                if ahead { "adelante" } else { "atrás" }
            ),
            Locale::En => format!(
                "{amount} {} {}",
                if singular { "hour" } else { "hours" },
                if ahead { "ahead" } else { "behind" }
            ),
        }
    }

    fn format_hours(self, magnitude: f64) -> String {
        if magnitude.fract() == 0.0 {
            return format!("{magnitude:.0}");
        }
        let text = format!("{magnitude:.1}");
        match self {
            Locale::Es => text.replace('.', ","),
            Locale::En => text,
        }
    }

    /// The one message shown whenever detection or conversion fails
    pub fn error_message(self) -> &'static str {
        match self {
            Locale::Es => {
                "No pudimos calcular la hora para tu ubicación. Por favor, verifica la hora original."
            }
            Locale::En => {
                "We could not calculate the time for your location. Please check the original time."
            }
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Locale::Es => "¡Prepárate para Nuestro Evento!",
            Locale::En => "Get Ready for Our Event!",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            Locale::Es => "La primera clase está a la vuelta de la esquina.",
            Locale::En => "The first class is just around the corner.",
        }
    }

    pub fn original_time_heading(self) -> &'static str {
        match self {
            Locale::Es => "Hora Original del Evento",
            Locale::En => "Original Event Time",
        }
    }

    pub fn event_zone_line(self, zone: &str) -> String {
        match self {
            Locale::Es => format!("(Hora del evento - {zone})"),
            Locale::En => format!("(Event time - {zone})"),
        }
    }

    pub fn local_time_heading(self) -> &'static str {
        match self {
            Locale::Es => "Tu Hora Local Estimada",
            Locale::En => "Your Estimated Local Time",
        }
    }

    pub fn loading(self) -> &'static str {
        match self {
            Locale::Es => "Calculando...",
            Locale::En => "Calculating...",
        }
    }

    /// Detected zone line with where it came from
    pub fn detected_zone_line(self, zone: &str, via_ip: bool) -> String {
        match (self, via_ip) {
            (Locale::Es, true) => format!("(Zona horaria detectada: {zone}, por IP)"),
            (Locale::Es, false) => format!("(Zona horaria detectada: {zone}, por el navegador)"),
            (Locale::En, true) => format!("(Detected timezone: {zone}, via IP)"),
            (Locale::En, false) => format!("(Detected timezone: {zone}, via browser)"),
        }
    }

    pub fn countdown_text(self, state: &CountdownState) -> String {
        let unit = |n: u64, one: &'static str, many: &'static str| {
            format!("{n} {}", if n == 1 { one } else { many })
        };
        match self {
            Locale::Es => format!(
                "Faltan {} {} {} {}",
                unit(state.days, "día", "días"),
                unit(state.hours, "hora", "horas"),
                unit(state.minutes, "minuto", "minutos"),
                unit(state.seconds, "segundo", "segundos"),
            ),
            Locale::En => format!(
                "{} {} {} {} to go",
                unit(state.days, "day", "days"),
                unit(state.hours, "hour", "hours"),
                unit(state.minutes, "minute", "minutes"),
                unit(state.seconds, "second", "seconds"),
            ),
        }
    }

    pub fn event_started(self) -> &'static str {
        match self {
            Locale::Es => "¡El evento ha comenzado!",
            Locale::En => "The event has started!",
        }
    }

    pub fn cta_line(self, url: &str) -> String {
        match self {
            Locale::Es => format!("Únete aquí: {url}"),
            Locale::En => format!("Join here: {url}"),
        }
    }

    pub fn footer(self, year: i32) -> String {
        format!("Time Traveler App © {year}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_locale_from_str() {
        assert_eq!("es".parse::<Locale>().unwrap(), Locale::Es);
        assert_eq!("EN-us".parse::<Locale>().unwrap(), Locale::En);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_format_long_spanish() {
        let local = chrono_tz::America::New_York
            .with_ymd_and_hms(2025, 5, 26, 20, 0, 0)
            .unwrap();
        assert_eq!(
            Locale::Es.format_long(&local),
            "Lunes 26 de Mayo de 2025, 8:00 PM (EDT)"
        );
    }

    #[test]
    fn test_format_long_english_morning() {
        let local = chrono_tz::Europe::Madrid
            .with_ymd_and_hms(2025, 5, 27, 2, 5, 0)
            .unwrap();
        assert_eq!(
            Locale::En.format_long(&local),
            "Tuesday, May 27, 2025, 2:05 AM (CEST)"
        );
    }

    #[test]
    fn test_format_long_midnight_and_noon() {
        let midnight = chrono_tz::UTC.with_ymd_and_hms(2025, 1, 1, 0, 30, 0).unwrap();
        let noon = chrono_tz::UTC.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();

        assert!(Locale::Es.format_long(&midnight).contains("12:30 AM"));
        assert!(Locale::Es.format_long(&noon).contains("12:00 PM"));
    }

    #[test]
    fn test_offset_sentence_spanish() {
        assert_eq!(Locale::Es.offset_sentence(0.0), "misma zona horaria");
        assert_eq!(Locale::Es.offset_sentence(1.0), "1 hora adelante");
        assert_eq!(Locale::Es.offset_sentence(-1.0), "1 hora atrás");
        assert_eq!(Locale::Es.offset_sentence(7.0), "7 horas adelante");
        assert_eq!(Locale::Es.offset_sentence(10.5), "10,5 horas adelante");
        assert_eq!(Locale::Es.offset_sentence(-0.5), "0,5 horas atrás");
    }

    #[test]
    fn test_offset_sentence_english() {
        assert_eq!(Locale::En.offset_sentence(0.0), "same timezone");
        assert_eq!(Locale::En.offset_sentence(-1.0), "1 hour behind");
        assert_eq!(Locale::En.offset_sentence(5.8), "5.8 hours ahead");
    }

    #[test]
    fn test_countdown_text_agreement() {
        let state = CountdownState::new(1, 2, 1, 0);
        assert_eq!(
            Locale::Es.countdown_text(&state),
            "Faltan 1 día 2 horas 1 minuto 0 segundos"
        );
        assert_eq!(
            Locale::En.countdown_text(&state),
            "1 day 2 hours 1 minute 0 seconds to go"
        );
    }
}
