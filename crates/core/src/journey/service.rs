//! Journey state machine - core escalation logic
//!
//! `JourneyService` owns the live journey record exclusively. Schedulers and
//! the presentation layer interact through event methods and read-only
//! snapshots; every state-changing operation increments the epoch, turning
//! callbacks armed under an older epoch into no-ops. Guard violations (for
//! example acknowledging a check while idle) are silent no-ops, never
//! errors, so rapid or duplicate user input stays harmless.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use wayhome_domain::constants::MIN_ESTIMATE_MINUTES;
use wayhome_domain::{Coordinate, JourneyPhase, JourneySnapshot, MonitorConfig, Result};

use super::ports::{HomeLocationRepository, JourneyObserver, LocationProvider};
use super::state::JourneyState;
use crate::geo;

/// Handle describing a freshly started journey, used to arm timers.
#[derive(Debug, Clone, Copy)]
pub struct StartedJourney {
    /// Epoch the journey's scheduled callbacks must carry.
    pub epoch: u64,
    /// Estimate fixed for the journey, in minutes.
    pub estimated_minutes: f64,
}

/// A committed phase transition.
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    /// Phase entered by the transition.
    pub phase: JourneyPhase,
    /// Epoch after the transition; guards follow-up timers.
    pub epoch: u64,
}

/// Outcome of feeding a polled position to the state machine.
#[derive(Debug, Clone, Copy)]
pub enum PollOutcome {
    /// Not near home; keep polling.
    Continue,
    /// Arrival detected; the journey ended.
    Arrived(Transition),
    /// The poll belonged to a journey that no longer exists.
    Stale,
}

/// Journey state machine.
pub struct JourneyService {
    config: MonitorConfig,
    location: Arc<dyn LocationProvider>,
    home: Arc<dyn HomeLocationRepository>,
    observers: Vec<Arc<dyn JourneyObserver>>,
    state: Mutex<JourneyState>,
}

impl JourneyService {
    /// Create a new journey service.
    pub fn new(
        config: MonitorConfig,
        location: Arc<dyn LocationProvider>,
        home: Arc<dyn HomeLocationRepository>,
    ) -> Self {
        Self { config, location, home, observers: Vec::new(), state: Mutex::new(JourneyState::new()) }
    }

    /// Add an observer to the service.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn JourneyObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Engine configuration, immutable for the service's lifetime.
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Start a journey from the current position.
    ///
    /// The estimate is derived from the distance to the home fix, or the
    /// fixed fallback when no home is configured. Location failures abort
    /// the start and surface to the caller; the machine stays idle.
    pub async fn begin_journey(&self) -> Result<StartedJourney> {
        let position = self.location.current_position().await?;
        let home = self.home.home_location();
        if home.is_none() {
            debug!("No home fix configured; using fallback estimate");
        }
        let estimated =
            geo::estimate_minutes_to_home(position, home, self.config.walking_speed_kmh);
        Ok(self.begin_journey_with_estimate(estimated))
    }

    /// Start a journey with a caller-supplied estimate, clamped to at least
    /// one minute. Restarting while a journey is underway atomically
    /// invalidates the previous journey's timers.
    pub fn begin_journey_with_estimate(&self, estimated_minutes: f64) -> StartedJourney {
        let estimated = estimated_minutes.max(MIN_ESTIMATE_MINUTES);
        let journey_id = Uuid::new_v4();
        let started = {
            let mut state = self.lock_state();
            state.epoch += 1;
            state.phase = JourneyPhase::Traveling;
            state.journey_id = Some(journey_id);
            state.started_at = Some(Instant::now());
            state.started_wall = Some(Utc::now());
            state.estimated_minutes = estimated;
            state.check_pending = false;
            StartedJourney { epoch: state.epoch, estimated_minutes: estimated }
        };
        info!(journey_id = %journey_id, estimated_minutes = estimated, "Journey started");
        self.notify_phase(JourneyPhase::Traveling);
        started
    }

    /// The overdue deadline elapsed. Returns the committed transition, or
    /// `None` when the timer was stale or the journey already left
    /// `Traveling`.
    pub fn overdue_check_fired(&self, epoch: u64) -> Option<Transition> {
        let transition = {
            let mut state = self.lock_state();
            if state.epoch != epoch || state.phase != JourneyPhase::Traveling {
                return None;
            }
            state.phase = JourneyPhase::Checking;
            state.check_pending = true;
            Transition { phase: state.phase, epoch: state.epoch }
        };
        warn!("Journey overdue; requesting check-in");
        for observer in &self.observers {
            observer.on_overdue_check();
        }
        self.notify_phase(JourneyPhase::Checking);
        Some(transition)
    }

    /// The check-in window elapsed. True when the guardian alert went out.
    ///
    /// Not a phase transition: the journey stays in `Checking` until the
    /// person acts. Guarded by the epoch and by `check_pending`, so an
    /// acknowledged check or an ended journey neutralizes the timer.
    pub fn guardian_notify_fired(&self, epoch: u64) -> bool {
        {
            let state = self.lock_state();
            if state.epoch != epoch
                || state.phase != JourneyPhase::Checking
                || !state.check_pending
            {
                return false;
            }
        }
        warn!("Check-in window expired; notifying guardian");
        for observer in &self.observers {
            observer.on_guardian_notify();
        }
        true
    }

    /// The person acknowledged the check-in prompt. Returns the journey to
    /// `Traveling`; the tick timer keeps its original epoch.
    pub fn confirm_ok(&self) -> Option<Transition> {
        let transition = {
            let mut state = self.lock_state();
            if state.phase != JourneyPhase::Checking {
                return None;
            }
            state.phase = JourneyPhase::Traveling;
            state.check_pending = false;
            Transition { phase: state.phase, epoch: state.epoch }
        };
        info!("Check-in acknowledged; journey continues");
        self.notify_phase(JourneyPhase::Traveling);
        Some(transition)
    }

    /// Manual arrival confirmation.
    pub fn signal_arrived(&self) -> Option<Transition> {
        self.end_active_journey(JourneyPhase::Arrived, None)
    }

    /// Cancel the journey without notifying anyone. Idempotent: cancelling
    /// while idle is a no-op.
    pub fn cancel(&self) -> Option<Transition> {
        self.end_active_journey(JourneyPhase::Idle, None)
    }

    /// Raise an immediate distress signal. Allowed from any phase, journey
    /// or not; any pending escalation is short-circuited.
    pub fn signal_sos(&self) -> Transition {
        let transition = {
            let mut state = self.lock_state();
            state.finish(JourneyPhase::Sos);
            Transition { phase: JourneyPhase::Sos, epoch: state.epoch }
        };
        warn!("SOS signalled");
        self.notify_phase(JourneyPhase::Sos);
        transition
    }

    /// Feed a polled position to the machine. Arrival inside the radius
    /// ends the journey; a stale epoch tells the poller to stop.
    pub fn position_polled(&self, position: Coordinate, epoch: u64) -> PollOutcome {
        {
            let state = self.lock_state();
            if state.epoch != epoch || !state.phase.is_active() {
                return PollOutcome::Stale;
            }
        }
        let home = self.home.home_location();
        if !geo::is_near_home(position, home, self.config.arrival_radius_km) {
            return PollOutcome::Continue;
        }
        debug!("Arrival detected by proximity poll");
        match self.end_active_journey(JourneyPhase::Arrived, Some(epoch)) {
            Some(transition) => PollOutcome::Arrived(transition),
            None => PollOutcome::Stale,
        }
    }

    /// Return a transient display phase (`Arrived` / `Sos`) to idle.
    ///
    /// With an epoch the call is a guarded auto-revert timer; without one it
    /// is an explicit dismissal by the host.
    pub fn dismiss(&self, required_epoch: Option<u64>) -> Option<Transition> {
        let transition = {
            let mut state = self.lock_state();
            if let Some(epoch) = required_epoch {
                if state.epoch != epoch {
                    return None;
                }
            }
            if !matches!(state.phase, JourneyPhase::Arrived | JourneyPhase::Sos) {
                return None;
            }
            state.finish(JourneyPhase::Idle);
            Transition { phase: JourneyPhase::Idle, epoch: state.epoch }
        };
        self.notify_phase(JourneyPhase::Idle);
        Some(transition)
    }

    /// Recompute timing telemetry and emit it to observers. Returns `None`
    /// once the epoch is stale, signalling the driving loop to exit.
    pub fn tick(&self, epoch: u64) -> Option<JourneySnapshot> {
        let snapshot = {
            let state = self.lock_state();
            if state.epoch != epoch || !state.phase.is_active() {
                return None;
            }
            state.snapshot(&self.config, Instant::now())
        };
        for observer in &self.observers {
            observer.on_tick(&snapshot);
        }
        Some(snapshot)
    }

    /// Read-only view of the current state.
    pub fn snapshot(&self) -> JourneySnapshot {
        self.lock_state().snapshot(&self.config, Instant::now())
    }

    /// Capture the current position and persist it as the home fix.
    ///
    /// Location failures surface to the caller with the same classification
    /// as journey starts.
    pub async fn set_home_to_current_position(&self) -> Result<Coordinate> {
        let position = self.location.current_position().await?;
        self.home.update_home_location(position).await?;
        info!("Home location updated");
        Ok(position)
    }

    fn end_active_journey(
        &self,
        target: JourneyPhase,
        required_epoch: Option<u64>,
    ) -> Option<Transition> {
        let (transition, journey_id) = {
            let mut state = self.lock_state();
            if let Some(epoch) = required_epoch {
                if state.epoch != epoch {
                    return None;
                }
            }
            if !state.phase.is_active() {
                return None;
            }
            let journey_id = state.journey_id;
            state.finish(target);
            (Transition { phase: target, epoch: state.epoch }, journey_id)
        };
        info!(journey_id = ?journey_id, phase = %target, "Journey ended");
        self.notify_phase(target);
        Some(transition)
    }

    fn notify_phase(&self, phase: JourneyPhase) {
        for observer in &self.observers {
            observer.on_phase_change(phase);
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, JourneyState> {
        // A poisoned lock only means a panic under the lock elsewhere; the
        // record itself is always left consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
