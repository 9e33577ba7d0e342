//! Journey monitor - composition root for the monitoring engine.
//!
//! Wires the state machine to the escalation scheduler and the arrival
//! poller, and exposes the operations the presentation layer calls. Timer
//! arming is atomic with the phase transitions: every armed callback carries
//! the epoch of the transition that armed it, so an operation that lands in
//! between simply invalidates the timers before they can act.

use std::sync::{Arc, Mutex as StdMutex, PoisonError};

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

use wayhome_core::journey::ports::{HomeLocationRepository, JourneyObserver, LocationProvider};
use wayhome_core::{JourneyService, StartedJourney, Transition};
use wayhome_domain::{Coordinate, JourneySnapshot, MonitorConfig, Result};

use crate::scheduling::{spawn_phase_revert, ArrivalPoller, EscalationScheduler};

/// Facade over the journey engine: state machine, timers, and poller.
pub struct JourneyMonitor {
    service: Arc<JourneyService>,
    escalation: Mutex<EscalationScheduler>,
    poller: Mutex<ArrivalPoller>,
    revert_handle: StdMutex<Option<JoinHandle<()>>>,
}

impl JourneyMonitor {
    /// Build a monitor from its collaborators.
    pub fn new(
        config: MonitorConfig,
        location: Arc<dyn LocationProvider>,
        home: Arc<dyn HomeLocationRepository>,
        observers: Vec<Arc<dyn JourneyObserver>>,
    ) -> Self {
        let service = observers.into_iter().fold(
            JourneyService::new(config, location.clone(), home),
            JourneyService::with_observer,
        );
        let service = Arc::new(service);
        Self {
            escalation: Mutex::new(EscalationScheduler::new(service.clone())),
            poller: Mutex::new(ArrivalPoller::new(service.clone(), location)),
            revert_handle: StdMutex::new(None),
            service,
        }
    }

    /// Start monitoring a journey from the current position.
    ///
    /// Location failures abort the start and surface to the caller; the
    /// machine stays idle and nothing is armed.
    #[instrument(skip(self))]
    pub async fn start(&self) -> Result<JourneySnapshot> {
        let journey = self.service.begin_journey().await?;
        self.arm(journey).await;
        Ok(self.service.snapshot())
    }

    /// Start monitoring with a caller-supplied estimate in minutes.
    #[instrument(skip(self))]
    pub async fn start_with_estimate(&self, estimated_minutes: f64) -> JourneySnapshot {
        let journey = self.service.begin_journey_with_estimate(estimated_minutes);
        self.arm(journey).await;
        self.service.snapshot()
    }

    /// Cancel the journey without notifying anyone. Idempotent.
    pub async fn cancel(&self) {
        if let Some(transition) = self.service.cancel() {
            debug!(phase = %transition.phase, "Journey cancelled");
        }
        self.teardown().await;
    }

    /// Acknowledge the overdue check-in prompt. The guardian-notify timer is
    /// disarmed; the journey and its tick keep running.
    pub async fn confirm_ok(&self) {
        if self.service.confirm_ok().is_some() {
            self.escalation.lock().await.disarm_guardian();
        }
    }

    /// Manual arrival confirmation.
    pub async fn signal_arrived(&self) {
        if let Some(transition) = self.service.signal_arrived() {
            self.teardown().await;
            self.schedule_revert(transition, self.service.config().arrived_display());
        }
    }

    /// Raise an immediate distress signal, from any phase.
    pub async fn signal_sos(&self) {
        let transition = self.service.signal_sos();
        self.teardown().await;
        self.schedule_revert(transition, self.service.config().sos_display());
    }

    /// Dismiss the arrived / SOS alert immediately instead of waiting for
    /// the auto-revert.
    pub fn dismiss_alert(&self) {
        self.service.dismiss(None);
        if let Some(handle) = self.take_revert_handle(None) {
            handle.abort();
        }
    }

    /// Read-only view of the current journey state.
    pub fn snapshot(&self) -> JourneySnapshot {
        self.service.snapshot()
    }

    /// Capture the current position and persist it as the home fix.
    pub async fn set_home_from_current_position(&self) -> Result<Coordinate> {
        self.service.set_home_to_current_position().await
    }

    async fn arm(&self, journey: StartedJourney) {
        {
            let mut escalation = self.escalation.lock().await;
            // timers from a previous journey, if any, die here; their
            // callbacks were already invalidated by the epoch bump
            if escalation.disarm().is_ok() {
                debug!("Previous journey timers disarmed");
            }
            if let Err(err) = escalation.arm(journey) {
                warn!(error = %err, "Failed to arm escalation timers");
            }
        }
        {
            let mut poller = self.poller.lock().await;
            let _ = poller.stop();
            if let Err(err) = poller.start(journey.epoch) {
                warn!(error = %err, "Failed to start arrival polling");
            }
        }
        if let Some(handle) = self.take_revert_handle(None) {
            handle.abort();
        }
    }

    async fn teardown(&self) {
        let _ = self.escalation.lock().await.disarm();
        let _ = self.poller.lock().await.stop();
    }

    fn schedule_revert(&self, transition: Transition, delay: std::time::Duration) {
        let handle = spawn_phase_revert(self.service.clone(), transition, delay);
        if let Some(previous) = self.take_revert_handle(Some(handle)) {
            previous.abort();
        }
    }

    fn take_revert_handle(&self, replacement: Option<JoinHandle<()>>) -> Option<JoinHandle<()>> {
        let mut guard = self.revert_handle.lock().unwrap_or_else(PoisonError::into_inner);
        match replacement {
            Some(handle) => guard.replace(handle),
            None => guard.take(),
        }
    }
}
