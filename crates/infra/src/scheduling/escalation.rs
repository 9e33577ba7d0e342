//! Escalation timers for an active journey.
//!
//! Owns the three scheduled actions measured from a journey's start: the
//! once-per-second tick, the overdue-check one-shot, and the guardian-notify
//! one-shot. All three capture the journey epoch at arm time, so a timer
//! that outlives its journey is a no-op even if it slips past cancellation.
//! `disarm` cancels the token and aborts the handles; the tick loop also
//! exits on its own as soon as the state machine reports a stale epoch.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use wayhome_core::{JourneyService, StartedJourney};

use super::error::{SchedulerError, SchedulerResult};

/// Escalation scheduler with an explicit arm/disarm lifecycle.
pub struct EscalationScheduler {
    service: Arc<JourneyService>,
    cancellation: CancellationToken,
    tick_handle: Option<JoinHandle<()>>,
    overdue_handle: Option<JoinHandle<()>>,
    guardian_handle: Option<JoinHandle<()>>,
}

impl EscalationScheduler {
    /// Create a disarmed scheduler bound to the state machine.
    pub fn new(service: Arc<JourneyService>) -> Self {
        Self {
            service,
            cancellation: CancellationToken::new(),
            tick_handle: None,
            overdue_handle: None,
            guardian_handle: None,
        }
    }

    /// Arm the tick, overdue-check and guardian-notify timers for a freshly
    /// started journey.
    #[instrument(skip(self))]
    pub fn arm(&mut self, journey: StartedJourney) -> SchedulerResult<()> {
        if self.is_armed() {
            return Err(SchedulerError::AlreadyArmed);
        }

        self.cancellation = CancellationToken::new();
        let config = self.service.config();
        let epoch = journey.epoch;

        let grace = minutes(config.grace_period_minutes);
        let overdue_delay = minutes(journey.estimated_minutes) + grace;
        let guardian_delay = overdue_delay + minutes(config.response_time_minutes);
        let tick_every = config.tick_interval();

        let service = self.service.clone();
        let cancel = self.cancellation.clone();
        self.tick_handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick_every);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    () = cancel.cancelled() => break,
                    _ = interval.tick() => {
                        if service.tick(epoch).is_none() {
                            break;
                        }
                    }
                }
            }
            debug!(epoch, "Tick loop exited");
        }));

        let service = self.service.clone();
        let cancel = self.cancellation.clone();
        self.overdue_handle = Some(tokio::spawn(async move {
            tokio::select! {
                () = cancel.cancelled() => {}
                () = tokio::time::sleep(overdue_delay) => {
                    service.overdue_check_fired(epoch);
                }
            }
        }));

        // Armed from journey start rather than from the overdue check, but
        // guarded by the check-pending flag: it cannot fire unless the
        // overdue check fired first and was not acknowledged.
        let service = self.service.clone();
        let cancel = self.cancellation.clone();
        self.guardian_handle = Some(tokio::spawn(async move {
            tokio::select! {
                () = cancel.cancelled() => {}
                () = tokio::time::sleep(guardian_delay) => {
                    service.guardian_notify_fired(epoch);
                }
            }
        }));

        debug!(epoch, estimated_minutes = journey.estimated_minutes, "Escalation timers armed");
        Ok(())
    }

    /// Abort the guardian-notify timer after an acknowledged check-in. The
    /// tick and the journey keep running.
    pub fn disarm_guardian(&mut self) {
        if let Some(handle) = self.guardian_handle.take() {
            handle.abort();
            debug!("Guardian-notify timer disarmed");
        }
    }

    /// Cancel every pending timer.
    #[instrument(skip(self))]
    pub fn disarm(&mut self) -> SchedulerResult<()> {
        if !self.is_armed() {
            return Err(SchedulerError::NotArmed);
        }

        self.cancellation.cancel();
        for handle in [
            self.tick_handle.take(),
            self.overdue_handle.take(),
            self.guardian_handle.take(),
        ]
        .into_iter()
        .flatten()
        {
            handle.abort();
        }
        debug!("Escalation timers disarmed");
        Ok(())
    }

    /// True while any timer task is live.
    pub fn is_armed(&self) -> bool {
        [&self.tick_handle, &self.overdue_handle, &self.guardian_handle]
            .into_iter()
            .flatten()
            .any(|handle| !handle.is_finished())
    }
}

fn minutes(value: f64) -> Duration {
    Duration::from_secs_f64(value.max(0.0) * 60.0)
}

impl Drop for EscalationScheduler {
    fn drop(&mut self) {
        if self.is_armed() {
            warn!("EscalationScheduler dropped while armed; cancelling timers");
            self.cancellation.cancel();
        }
    }
}
