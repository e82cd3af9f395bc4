//! Timezone detection for the viewer
//!
//! Two-step resolution: IP geolocation first, then the local environment.
//! Network problems never surface on their own; they only matter when the
//! fallback comes up empty as well.

mod config;
mod geo;
mod local;

pub use config::{Config, DEFAULT_GEOLOCATION_URL};
pub use geo::{GeoLocator, GeoLookupError, HttpGeoLocator};
pub use local::{LocalZoneSource, SystemZoneSource};

use timetraveler_core::{DetectedTimezone, EventTimeError, EventTimeResult, Provenance};
use tracing::{info, warn};

/// Resolves the viewer's timezone with provenance
#[derive(Debug, Clone)]
pub struct Detector<G, L> {
    geo: Option<G>,
    local: L,
}

impl Detector<HttpGeoLocator, SystemZoneSource> {
    /// Production detector built from configuration
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        if !config.geolocation_enabled {
            info!("IP geolocation disabled, using local timezone only");
            return Ok(Self::local_only(SystemZoneSource));
        }

        let geo = HttpGeoLocator::new(config.geolocation_url.clone(), config.timeout())?;
        Ok(Self::new(geo, SystemZoneSource))
    }
}

impl<G, L> Detector<G, L>
where
    G: GeoLocator,
    L: LocalZoneSource,
{
    pub fn new(geo: G, local: L) -> Self {
        Self {
            geo: Some(geo),
            local,
        }
    }

    /// Detector that never touches the network
    pub fn local_only(local: L) -> Self {
        Self { geo: None, local }
    }

    /// Resolve the viewer's timezone
    ///
    /// Provenance is `Ip` only when the geolocation service answered with a
    /// non-blank zone. The zone is returned as reported; checking it against
    /// the tz database is left to the converter.
    pub async fn detect(&self) -> EventTimeResult<DetectedTimezone> {
        if let Some(geo) = &self.geo {
            match geo.locate().await {
                Ok(zone) if !zone.trim().is_empty() => {
                    info!(zone = %zone, "Timezone detected via IP geolocation");
                    return Ok(DetectedTimezone::new(zone.trim(), Provenance::Ip));
                }
                Ok(_) => warn!("IP geolocation returned a blank timezone, falling back"),
                Err(e) => warn!("IP geolocation failed, falling back: {}", e),
            }
        }

        match self.local.local_timezone() {
            Some(zone) if !zone.trim().is_empty() => {
                info!(zone = %zone, "Timezone detected from local environment");
                Ok(DetectedTimezone::new(zone.trim(), Provenance::Browser))
            }
            _ => Err(EventTimeError::Detection(
                "neither IP geolocation nor the local environment provided a timezone".to_string(),
            )),
        }
    }
}
