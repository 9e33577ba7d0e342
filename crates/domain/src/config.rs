//! Monitor configuration
//!
//! Tuning knobs for the journey monitoring engine, supplied once at
//! construction and immutable for the engine's lifetime. Every field has a
//! serde default so partial config files and environment overlays work.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    ARRIVAL_RADIUS_KM, ARRIVED_DISPLAY_SECS, DEFAULT_GRACE_PERIOD_MINUTES,
    DEFAULT_RESPONSE_TIME_MINUTES, LOCATION_TIMEOUT_SECS, POLL_INTERVAL_SECS, SOS_DISPLAY_SECS,
    TICK_INTERVAL_SECS, WALKING_SPEED_KMH,
};

/// Configuration for the journey monitoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Extra minutes past the estimate before the overdue check fires.
    #[serde(default = "default_grace_period")]
    pub grace_period_minutes: f64,

    /// Minutes allowed to acknowledge the overdue check before the guardian
    /// is notified.
    #[serde(default = "default_response_time")]
    pub response_time_minutes: f64,

    /// A position fix closer than this to home counts as arrived.
    #[serde(default = "default_arrival_radius")]
    pub arrival_radius_km: f64,

    /// Seconds between arrival polls while a journey is active.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Assumed walking speed for travel-time estimates.
    #[serde(default = "default_walking_speed")]
    pub walking_speed_kmh: f64,

    /// Seconds between elapsed-time recomputations.
    #[serde(default = "default_tick_interval")]
    pub tick_interval_secs: u64,

    /// Upper bound on a single position request.
    #[serde(default = "default_location_timeout")]
    pub location_timeout_secs: u64,

    /// Seconds the arrival confirmation stays up before reverting to idle.
    #[serde(default = "default_arrived_display")]
    pub arrived_display_secs: u64,

    /// Seconds the SOS alert stays up before reverting to idle.
    #[serde(default = "default_sos_display")]
    pub sos_display_secs: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            grace_period_minutes: default_grace_period(),
            response_time_minutes: default_response_time(),
            arrival_radius_km: default_arrival_radius(),
            poll_interval_secs: default_poll_interval(),
            walking_speed_kmh: default_walking_speed(),
            tick_interval_secs: default_tick_interval(),
            location_timeout_secs: default_location_timeout(),
            arrived_display_secs: default_arrived_display(),
            sos_display_secs: default_sos_display(),
        }
    }
}

impl MonitorConfig {
    /// Interval between arrival polls.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Interval between timing telemetry recomputations.
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_interval_secs)
    }

    /// Bound applied to a single position request.
    #[must_use]
    pub const fn location_timeout(&self) -> Duration {
        Duration::from_secs(self.location_timeout_secs)
    }

    /// How long the arrival confirmation stays up.
    #[must_use]
    pub const fn arrived_display(&self) -> Duration {
        Duration::from_secs(self.arrived_display_secs)
    }

    /// How long the SOS alert stays up.
    #[must_use]
    pub const fn sos_display(&self) -> Duration {
        Duration::from_secs(self.sos_display_secs)
    }
}

fn default_grace_period() -> f64 {
    DEFAULT_GRACE_PERIOD_MINUTES
}

fn default_response_time() -> f64 {
    DEFAULT_RESPONSE_TIME_MINUTES
}

fn default_arrival_radius() -> f64 {
    ARRIVAL_RADIUS_KM
}

const fn default_poll_interval() -> u64 {
    POLL_INTERVAL_SECS
}

fn default_walking_speed() -> f64 {
    WALKING_SPEED_KMH
}

const fn default_tick_interval() -> u64 {
    TICK_INTERVAL_SECS
}

const fn default_location_timeout() -> u64 {
    LOCATION_TIMEOUT_SECS
}

const fn default_arrived_display() -> u64 {
    ARRIVED_DISPLAY_SECS
}

const fn default_sos_display() -> u64 {
    SOS_DISPLAY_SECS
}
