//! Shared test doubles for infra integration tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use wayhome_core::journey::ports::{JourneyObserver, LocationProvider};
use wayhome_domain::{Coordinate, JourneyPhase, JourneySnapshot, MonitorConfig, Result};

/// Home fix used across the suite.
pub const HOME: Coordinate = Coordinate::new(40.4168, -3.7038);

/// ~500 m north of home, outside the arrival radius.
#[must_use]
pub fn far_from_home() -> Coordinate {
    Coordinate::new(HOME.latitude + 0.0045, HOME.longitude)
}

/// ~30 m north of home, inside the arrival radius.
#[must_use]
pub fn near_home() -> Coordinate {
    Coordinate::new(HOME.latitude + 0.0003, HOME.longitude)
}

/// Demo escalation windows: 30 s grace, 30 s check-in window.
#[must_use]
pub fn demo_config() -> MonitorConfig {
    MonitorConfig {
        grace_period_minutes: 0.5,
        response_time_minutes: 0.5,
        ..MonitorConfig::default()
    }
}

/// Let spawned timer tasks observe an advanced clock.
pub async fn settle() {
    for _ in 0..25 {
        tokio::task::yield_now().await;
    }
}

/// Scriptable `LocationProvider`: queued one-shot responses first, then the
/// fallback forever.
pub struct ScriptedLocationProvider {
    responses: Mutex<VecDeque<Result<Coordinate>>>,
    fallback: Result<Coordinate>,
}

impl ScriptedLocationProvider {
    pub fn fixed(position: Coordinate) -> Self {
        Self { responses: Mutex::new(VecDeque::new()), fallback: Ok(position) }
    }

    pub fn failing(error: wayhome_domain::WayhomeError) -> Self {
        Self { responses: Mutex::new(VecDeque::new()), fallback: Err(error) }
    }

    pub fn push_response(&self, response: Result<Coordinate>) {
        self.responses.lock().expect("responses mutex poisoned").push_back(response);
    }
}

#[async_trait]
impl LocationProvider for ScriptedLocationProvider {
    async fn current_position(&self) -> Result<Coordinate> {
        let queued = self.responses.lock().expect("responses mutex poisoned").pop_front();
        queued.unwrap_or_else(|| self.fallback.clone())
    }
}

/// Observer that records every callback for later assertions.
#[derive(Default)]
pub struct RecordingObserver {
    phases: Mutex<Vec<JourneyPhase>>,
    overdue_checks: AtomicUsize,
    guardian_notifies: AtomicUsize,
    ticks: AtomicUsize,
}

impl RecordingObserver {
    pub fn phases(&self) -> Vec<JourneyPhase> {
        self.phases.lock().expect("phases mutex poisoned").clone()
    }

    pub fn overdue_count(&self) -> usize {
        self.overdue_checks.load(Ordering::SeqCst)
    }

    pub fn guardian_count(&self) -> usize {
        self.guardian_notifies.load(Ordering::SeqCst)
    }

    pub fn tick_count(&self) -> usize {
        self.ticks.load(Ordering::SeqCst)
    }
}

impl JourneyObserver for RecordingObserver {
    fn on_phase_change(&self, phase: JourneyPhase) {
        self.phases.lock().expect("phases mutex poisoned").push(phase);
    }

    fn on_overdue_check(&self) {
        self.overdue_checks.fetch_add(1, Ordering::SeqCst);
    }

    fn on_guardian_notify(&self) {
        self.guardian_notifies.fetch_add(1, Ordering::SeqCst);
    }

    fn on_tick(&self, _snapshot: &JourneySnapshot) {
        self.ticks.fetch_add(1, Ordering::SeqCst);
    }
}
