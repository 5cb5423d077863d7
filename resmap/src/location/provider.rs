//! Location sources.

use std::future::Future;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use super::error::LocationError;
use crate::coord::LonLat;
use crate::source::AsyncHttpClient;

/// Something that can report the user's current position.
pub trait LocationSource: Send + Sync {
    fn current(&self) -> impl Future<Output = Result<LonLat, LocationError>> + Send;
}

/// Body served by the device-local location endpoint.
#[derive(Debug, Deserialize)]
struct LocationReport {
    latitude: f64,
    longitude: f64,
}

/// Reads `{latitude, longitude}` from a JSON endpoint on the device.
pub struct LocalEndpointSource<C> {
    client: Arc<C>,
    url: String,
}

impl<C: AsyncHttpClient> LocalEndpointSource<C> {
    pub fn new(client: Arc<C>, url: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
        }
    }
}

impl<C: AsyncHttpClient> LocationSource for LocalEndpointSource<C> {
    async fn current(&self) -> Result<LonLat, LocationError> {
        let body = self.client.get(&self.url).await?;
        let report: LocationReport =
            serde_json::from_slice(&body).map_err(|e| LocationError::Json(e.to_string()))?;

        let at = LonLat::new(report.longitude, report.latitude);
        if !at.is_valid() {
            return Err(LocationError::OutOfRange {
                lat: report.latitude,
                lon: report.longitude,
            });
        }
        debug!(url = %self.url, at = %at, "Location endpoint answered");
        Ok(at)
    }
}

/// A position set once, e.g. from configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocation(pub Option<LonLat>);

impl LocationSource for FixedLocation {
    async fn current(&self) -> Result<LonLat, LocationError> {
        self.0.ok_or(LocationError::Unavailable)
    }
}

/// Asks `primary` first and `fallback` if that fails.
pub struct FallbackLocation<A, B> {
    primary: A,
    fallback: B,
}

impl<A, B> FallbackLocation<A, B> {
    pub fn new(primary: A, fallback: B) -> Self {
        Self { primary, fallback }
    }
}

impl<A: LocationSource, B: LocationSource> LocationSource for FallbackLocation<A, B> {
    async fn current(&self) -> Result<LonLat, LocationError> {
        match self.primary.current().await {
            Ok(at) => Ok(at),
            Err(e) => {
                warn!(error = %e, "Primary location source failed, using fallback");
                self.fallback.current().await
            }
        }
    }
}
