//! IP-geolocation lookup
//!
//! One `GET` per call, no retries. Anything other than a 2xx JSON body with a
//! non-blank `timezone` field is an error, which the detector treats as a
//! signal to fall back.

use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Reasons a geolocation lookup did not yield a zone
#[derive(Error, Debug)]
pub enum GeoLookupError {
    #[error("Geolocation request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Geolocation service returned status {0}")]
    Status(u16),

    #[error("Geolocation response has no timezone")]
    MissingTimezone,
}

/// Source of the viewer's timezone based on their network location
pub trait GeoLocator: Send + Sync {
    fn locate(&self) -> impl Future<Output = Result<String, GeoLookupError>> + Send;
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    #[serde(default)]
    timezone: Option<String>,
}

/// Geolocation over HTTP against any service answering `{"timezone": "..."}`
#[derive(Debug, Clone)]
pub struct HttpGeoLocator {
    client: reqwest::Client,
    url: Url,
}

impl HttpGeoLocator {
    pub fn new(url: Url, timeout: Duration) -> Result<Self, GeoLookupError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl GeoLocator for HttpGeoLocator {
    async fn locate(&self) -> Result<String, GeoLookupError> {
        tracing::debug!("Requesting timezone from {}", self.url);

        let response = self.client.get(self.url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeoLookupError::Status(status.as_u16()));
        }

        let body: GeoResponse = response.json().await?;
        body.timezone
            .map(|tz| tz.trim().to_string())
            .filter(|tz| !tz.is_empty())
            .ok_or(GeoLookupError::MissingTimezone)
    }
}
