//! Geographic value types

use serde::{Deserialize, Serialize};

/// A geographic point in decimal degrees.
///
/// "Home not configured" is always modelled as `Option<Coordinate>`, never
/// as sentinel numeric fields, so every consumer handles the unset case
/// explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in decimal degrees, north positive.
    pub latitude: f64,
    /// Longitude in decimal degrees, east positive.
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate from decimal degrees.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}
