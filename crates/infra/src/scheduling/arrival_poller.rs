//! Periodic proximity polling for automatic arrival detection.
//!
//! While a journey is active, requests the current position on a fixed
//! interval and feeds it to the state machine; a fix inside the arrival
//! radius ends the journey. Poll failures are swallowed: transient GPS loss
//! must not interrupt monitoring, and the next regular interval is the only
//! retry. The loop exits on its own once the journey epoch goes stale.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use wayhome_core::journey::ports::LocationProvider;
use wayhome_core::{JourneyService, PollOutcome};

use super::error::{SchedulerError, SchedulerResult};
use super::revert::spawn_phase_revert;

/// Arrival poller with an explicit start/stop lifecycle.
pub struct ArrivalPoller {
    service: Arc<JourneyService>,
    location: Arc<dyn LocationProvider>,
    cancellation: CancellationToken,
    poll_handle: Option<JoinHandle<()>>,
}

impl ArrivalPoller {
    /// Create a stopped poller bound to the state machine.
    pub fn new(service: Arc<JourneyService>, location: Arc<dyn LocationProvider>) -> Self {
        Self { service, location, cancellation: CancellationToken::new(), poll_handle: None }
    }

    /// Begin polling for the journey armed under `epoch`.
    #[instrument(skip(self))]
    pub fn start(&mut self, epoch: u64) -> SchedulerResult<()> {
        if self.is_running() {
            return Err(SchedulerError::AlreadyArmed);
        }

        self.cancellation = CancellationToken::new();
        let service = self.service.clone();
        let location = self.location.clone();
        let cancel = self.cancellation.clone();
        let poll_every = service.config().poll_interval();
        let arrived_display = service.config().arrived_display();

        self.poll_handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(poll_every);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // the zeroth tick completes immediately; the first real poll
            // happens one full interval after the journey starts
            interval.tick().await;
            loop {
                tokio::select! {
                    () = cancel.cancelled() => break,
                    _ = interval.tick() => {
                        match location.current_position().await {
                            Ok(position) => {
                                match service.position_polled(position, epoch) {
                                    PollOutcome::Continue => {}
                                    PollOutcome::Arrived(transition) => {
                                        // epoch-guarded; safe to detach
                                        let _ = spawn_phase_revert(
                                            service.clone(),
                                            transition,
                                            arrived_display,
                                        );
                                        break;
                                    }
                                    PollOutcome::Stale => break,
                                }
                            }
                            Err(err) => {
                                debug!(error = %err, "Arrival poll failed; retrying next interval");
                            }
                        }
                    }
                }
            }
            debug!(epoch, "Arrival poller exited");
        }));

        debug!(epoch, "Arrival polling started");
        Ok(())
    }

    /// Stop polling.
    #[instrument(skip(self))]
    pub fn stop(&mut self) -> SchedulerResult<()> {
        if !self.is_running() {
            return Err(SchedulerError::NotArmed);
        }

        self.cancellation.cancel();
        if let Some(handle) = self.poll_handle.take() {
            handle.abort();
        }
        debug!("Arrival polling stopped");
        Ok(())
    }

    /// True while the polling task is live.
    pub fn is_running(&self) -> bool {
        self.poll_handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for ArrivalPoller {
    fn drop(&mut self) {
        if self.is_running() {
            warn!("ArrivalPoller dropped while running; cancelling task");
            self.cancellation.cancel();
        }
    }
}
