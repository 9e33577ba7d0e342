//! Common data types used throughout the application

pub mod geo;
pub mod journey;

pub use geo::Coordinate;
pub use journey::{JourneyPhase, JourneySnapshot};
