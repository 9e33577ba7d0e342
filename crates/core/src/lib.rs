//! # Wayhome Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The distance/ETA estimator and proximity oracle
//! - The journey state machine and its timing telemetry
//! - Port/adapter interfaces (traits) for external collaborators
//!
//! ## Architecture Principles
//! - Only depends on `wayhome-domain`
//! - No timer spawning, no device access; external capability via traits
//! - State transitions are synchronous and serialized behind one lock

pub mod geo;
pub mod journey;

// Re-export specific items to avoid ambiguity
pub use journey::ports::{HomeLocationRepository, JourneyObserver, LocationProvider};
pub use journey::service::{JourneyService, PollOutcome, StartedJourney, Transition};
