//! Geographic distance and travel-time estimation
//!
//! Pure functions feeding the journey state machine: the haversine distance,
//! the walking-time estimator, and the arrival-by-proximity predicate.

pub mod estimator;
pub mod proximity;

pub use estimator::{distance_km, estimate_minutes_to_home, walk_minutes};
pub use proximity::is_near_home;
