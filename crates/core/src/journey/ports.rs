//! Port interfaces for journey monitoring
//!
//! These traits define the boundaries between the monitoring engine and its
//! external collaborators: device location, the profile store holding the
//! home fix, and the presentation layer.

use async_trait::async_trait;
use wayhome_domain::{Coordinate, JourneyPhase, JourneySnapshot, Result};

/// Trait for acquiring the device's current position.
///
/// Single-shot: every failure is classified as exactly one of
/// `PermissionDenied`, `PositionUnavailable`, or `LocationTimeout`, and each
/// request is bounded by the configured timeout. The engine never retries;
/// each caller issues its own request and handles its own failure.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Get the current position.
    async fn current_position(&self) -> Result<Coordinate>;
}

/// Trait for reading and persisting the signed-in person's home fix.
///
/// Durable storage lives with the external profile store; the engine only
/// consumes the current value and emits updates.
#[async_trait]
pub trait HomeLocationRepository: Send + Sync {
    /// The configured home coordinates, if any.
    fn home_location(&self) -> Option<Coordinate>;

    /// Persist a new home fix.
    async fn update_home_location(&self, home: Coordinate) -> Result<()>;
}

/// Observer callbacks for user-visible journey events.
///
/// Called synchronously after the state lock is released. Implementations
/// should hand off to their own channel rather than block, and must not call
/// back into the state machine.
pub trait JourneyObserver: Send + Sync {
    /// A phase transition was committed.
    fn on_phase_change(&self, phase: JourneyPhase) {
        let _ = phase;
    }

    /// The overdue check fired; the person should be prompted to check in.
    fn on_overdue_check(&self) {}

    /// The check-in window expired; the guardian should be alerted.
    fn on_guardian_notify(&self) {}

    /// Periodic timing telemetry while a journey is active.
    fn on_tick(&self, snapshot: &JourneySnapshot) {
        let _ = snapshot;
    }
}
