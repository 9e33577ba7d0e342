//! Journey monitoring: the escalation state machine and its ports

pub mod ports;
pub mod service;
mod state;

pub use ports::{HomeLocationRepository, JourneyObserver, LocationProvider};
pub use service::{JourneyService, PollOutcome, StartedJourney, Transition};
