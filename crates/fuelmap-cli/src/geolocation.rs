//! Sources for the user's current position.

use std::future::Future;
use std::time::Duration;

use fuelmap_core::Coordinate;
use reqwest::{Client, Url};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    /// Upper bound on how long [`locate`] waits for a fix.
    pub timeout: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("position unavailable: {0}")]
    PositionUnavailable(String),

    #[error("timed out after {0:?} waiting for a position")]
    Timeout(Duration),
}

/// Something that can report where the user is.
pub trait Geolocator {
    fn current_position(
        &self,
        options: PositionOptions,
    ) -> impl Future<Output = Result<Coordinate, GeolocationError>> + Send;
}

/// Ask `geolocator` for a position, giving up after `options.timeout`.
///
/// # Errors
///
/// Returns the geolocator's own error, or [`GeolocationError::Timeout`]
/// when no answer arrives in time.
pub async fn locate<G: Geolocator>(
    geolocator: &G,
    options: PositionOptions,
) -> Result<Coordinate, GeolocationError> {
    match tokio::time::timeout(options.timeout, geolocator.current_position(options)).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(timeout = ?options.timeout, "geolocation timed out");
            Err(GeolocationError::Timeout(options.timeout))
        }
    }
}

/// A position supplied up front, e.g. from command-line flags.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Coordinate);

impl Geolocator for FixedPosition {
    async fn current_position(
        &self,
        _options: PositionOptions,
    ) -> Result<Coordinate, GeolocationError> {
        Ok(self.0)
    }
}

/// No position source configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPosition;

impl Geolocator for NoPosition {
    async fn current_position(
        &self,
        _options: PositionOptions,
    ) -> Result<Coordinate, GeolocationError> {
        Err(GeolocationError::PositionUnavailable(
            "no position source configured".to_string(),
        ))
    }
}

#[derive(Debug, Deserialize)]
struct PositionResponse {
    latitude: f64,
    longitude: f64,
}

/// Looks the position up from an HTTP endpoint returning
/// `{"latitude": .., "longitude": ..}`.
#[derive(Debug, Clone)]
pub struct HttpGeolocator {
    client: Client,
    url: Url,
}

impl HttpGeolocator {
    /// # Errors
    ///
    /// Returns [`GeolocationError::PositionUnavailable`] if `url` does not
    /// parse or the HTTP client cannot be built.
    pub fn new(url: &str, user_agent: &str) -> Result<Self, GeolocationError> {
        let url = Url::parse(url).map_err(|e| {
            GeolocationError::PositionUnavailable(format!("invalid geolocation URL '{url}': {e}"))
        })?;
        let client = Client::builder()
            .user_agent(user_agent)
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| GeolocationError::PositionUnavailable(e.to_string()))?;
        Ok(Self { client, url })
    }
}

impl Geolocator for HttpGeolocator {
    async fn current_position(
        &self,
        options: PositionOptions,
    ) -> Result<Coordinate, GeolocationError> {
        let unavailable = |e: reqwest::Error| GeolocationError::PositionUnavailable(e.to_string());

        let mut url = self.url.clone();
        url.query_pairs_mut().append_pair(
            "high_accuracy",
            if options.high_accuracy { "true" } else { "false" },
        );

        let body: PositionResponse = self
            .client
            .get(url)
            .send()
            .await
            .map_err(unavailable)?
            .error_for_status()
            .map_err(unavailable)?
            .json()
            .await
            .map_err(unavailable)?;

        Coordinate::new(body.latitude, body.longitude)
            .map_err(|e| GeolocationError::PositionUnavailable(e.to_string()))
    }
}

/// The position source chosen at startup.
#[derive(Debug, Clone)]
pub enum PositionProvider {
    Fixed(FixedPosition),
    Http(HttpGeolocator),
    Unavailable(NoPosition),
}

impl Geolocator for PositionProvider {
    async fn current_position(
        &self,
        options: PositionOptions,
    ) -> Result<Coordinate, GeolocationError> {
        match self {
            PositionProvider::Fixed(g) => g.current_position(options).await,
            PositionProvider::Http(g) => g.current_position(options).await,
            PositionProvider::Unavailable(g) => g.current_position(options).await,
        }
    }
}
