//! Application constants
//!
//! Centralized location for all domain-level constants used by the journey
//! monitoring engine.

/// Mean Earth radius in kilometers, used by the haversine distance.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Assumed walking speed when estimating travel time.
pub const WALKING_SPEED_KMH: f64 = 5.0;

/// A position fix closer than this to the home fix counts as arrived.
pub const ARRIVAL_RADIUS_KM: f64 = 0.1;

/// Estimate used when no home fix is configured.
pub const FALLBACK_ESTIMATE_MINUTES: f64 = 10.0;

/// Journeys never start with an estimate below this.
pub const MIN_ESTIMATE_MINUTES: f64 = 1.0;

// Escalation defaults
pub const DEFAULT_GRACE_PERIOD_MINUTES: f64 = 5.0;
pub const DEFAULT_RESPONSE_TIME_MINUTES: f64 = 3.0;

// Timer cadence
pub const TICK_INTERVAL_SECS: u64 = 1;
pub const POLL_INTERVAL_SECS: u64 = 30;

/// Upper bound on a single position request.
pub const LOCATION_TIMEOUT_SECS: u64 = 10;

// Transient display phases revert to idle after these delays.
pub const ARRIVED_DISPLAY_SECS: u64 = 3;
pub const SOS_DISPLAY_SECS: u64 = 5;
