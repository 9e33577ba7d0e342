//! Great-circle distance and walking-time estimation
//!
//! Pure and total: invalid coordinates propagate NaN rather than erroring;
//! validation belongs to the caller.

use wayhome_domain::constants::{EARTH_RADIUS_KM, FALLBACK_ESTIMATE_MINUTES, MIN_ESTIMATE_MINUTES};
use wayhome_domain::Coordinate;

/// Great-circle distance between two points in kilometers (haversine).
#[must_use]
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Walking time in whole minutes for a distance, floored at one minute.
#[must_use]
pub fn walk_minutes(distance_km: f64, speed_kmh: f64) -> f64 {
    (distance_km / speed_kmh * 60.0).round().max(MIN_ESTIMATE_MINUTES)
}

/// Estimated walking time from `point` to the home fix.
///
/// Falls back to a fixed ten-minute estimate when no home is configured, so
/// the state machine always has a usable estimate to start a journey.
#[must_use]
pub fn estimate_minutes_to_home(
    point: Coordinate,
    home: Option<Coordinate>,
    speed_kmh: f64,
) -> f64 {
    home.map_or(FALLBACK_ESTIMATE_MINUTES, |home| {
        walk_minutes(distance_km(point, home), speed_kmh)
    })
}
