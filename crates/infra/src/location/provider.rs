//! Timeout decoration for location providers.
//!
//! Wraps any `LocationProvider` and bounds each request, classifying the
//! expiry as `LocationTimeout`. Platform providers report their own
//! `PermissionDenied` / `PositionUnavailable` outcomes; this decorator
//! completes the classified error set required of every provider.

use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use wayhome_core::journey::ports::LocationProvider;
use wayhome_domain::{Coordinate, MonitorConfig, Result, WayhomeError};

/// `LocationProvider` decorator applying the configured request bound.
pub struct TimedLocationProvider<P> {
    inner: P,
    timeout: Duration,
}

impl<P: LocationProvider> TimedLocationProvider<P> {
    /// Wrap `inner` with an explicit bound.
    pub const fn new(inner: P, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    /// Wrap `inner` with the bound from the monitor configuration.
    pub fn from_config(inner: P, config: &MonitorConfig) -> Self {
        Self::new(inner, config.location_timeout())
    }
}

#[async_trait]
impl<P: LocationProvider> LocationProvider for TimedLocationProvider<P> {
    async fn current_position(&self) -> Result<Coordinate> {
        match tokio::time::timeout(self.timeout, self.inner.current_position()).await {
            Ok(result) => result,
            Err(_) => {
                warn!(timeout_secs = self.timeout.as_secs(), "Position request timed out");
                Err(WayhomeError::LocationTimeout(self.timeout.as_secs()))
            }
        }
    }
}
