//! Live journey state owned by the state machine

use chrono::{DateTime, Utc};
use tokio::time::Instant;
use uuid::Uuid;

use wayhome_domain::{JourneyPhase, JourneySnapshot, MonitorConfig};

/// The single live record behind the state machine's lock.
///
/// Only the phase, the start instant, and the fixed estimate are stored.
/// Every timing field the presentation layer sees is derived on read from
/// the monotonic clock, so reported values stay correct across suspended or
/// throttled execution.
#[derive(Debug)]
pub(crate) struct JourneyState {
    pub phase: JourneyPhase,
    /// Generation counter. Scheduled callbacks capture it at arm time and
    /// become no-ops once it moves.
    pub epoch: u64,
    pub journey_id: Option<Uuid>,
    /// Monotonic start instant; present iff the phase is active.
    pub started_at: Option<Instant>,
    /// Wall-clock start, telemetry only.
    pub started_wall: Option<DateTime<Utc>>,
    pub estimated_minutes: f64,
    pub check_pending: bool,
}

impl JourneyState {
    pub fn new() -> Self {
        Self {
            phase: JourneyPhase::Idle,
            epoch: 0,
            journey_id: None,
            started_at: None,
            started_wall: None,
            estimated_minutes: 0.0,
            check_pending: false,
        }
    }

    /// End the journey, entering `phase` and invalidating every scheduled
    /// callback armed under the previous epoch.
    pub fn finish(&mut self, phase: JourneyPhase) {
        self.epoch += 1;
        self.phase = phase;
        self.journey_id = None;
        self.started_at = None;
        self.started_wall = None;
        self.estimated_minutes = 0.0;
        self.check_pending = false;
    }

    /// Derived, read-only view at `now`.
    pub fn snapshot(&self, config: &MonitorConfig, now: Instant) -> JourneySnapshot {
        let elapsed = self
            .started_at
            .map_or(0.0, |started| (now - started).as_secs_f64() / 60.0);
        let overtime = elapsed - self.estimated_minutes - config.grace_period_minutes;
        JourneySnapshot {
            phase: self.phase,
            journey_id: self.journey_id,
            started_at: self.started_wall,
            elapsed_minutes: elapsed,
            estimated_minutes: self.estimated_minutes,
            is_overtime: self.started_at.is_some() && overtime > 0.0,
            overtime_minutes: overtime.max(0.0),
            check_pending: self.check_pending,
        }
    }
}
