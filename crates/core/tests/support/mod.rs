//! Mock port implementations for testing
//!
//! Provides in-memory mocks for the journey ports, enabling deterministic
//! unit tests without device or timer dependencies.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;
use wayhome_core::journey::ports::{HomeLocationRepository, JourneyObserver, LocationProvider};
use wayhome_domain::{Coordinate, JourneyPhase, JourneySnapshot, Result as DomainResult};

/// In-memory mock for `LocationProvider` with a fixed outcome.
pub struct MockLocationProvider {
    outcome: DomainResult<Coordinate>,
}

impl MockLocationProvider {
    /// A provider that always yields the same fix.
    pub fn fixed(position: Coordinate) -> Self {
        Self { outcome: Ok(position) }
    }

    /// A provider that always fails with the given classified error.
    pub fn failing(error: wayhome_domain::WayhomeError) -> Self {
        Self { outcome: Err(error) }
    }
}

#[async_trait]
impl LocationProvider for MockLocationProvider {
    async fn current_position(&self) -> DomainResult<Coordinate> {
        self.outcome.clone()
    }
}

/// In-memory mock for `HomeLocationRepository`.
#[derive(Default)]
pub struct MockHomeRepository {
    home: RwLock<Option<Coordinate>>,
    updates: Mutex<Vec<Coordinate>>,
}

impl MockHomeRepository {
    /// A repository with no home fix configured.
    pub fn unset() -> Self {
        Self::default()
    }

    /// A repository seeded with a home fix.
    pub fn at(home: Coordinate) -> Self {
        Self { home: RwLock::new(Some(home)), updates: Mutex::new(Vec::new()) }
    }

    /// Every fix persisted through the port, in order.
    pub fn updates(&self) -> Vec<Coordinate> {
        self.updates.lock().expect("updates mutex poisoned").clone()
    }
}

#[async_trait]
impl HomeLocationRepository for MockHomeRepository {
    fn home_location(&self) -> Option<Coordinate> {
        *self.home.read().expect("home lock poisoned")
    }

    async fn update_home_location(&self, home: Coordinate) -> DomainResult<()> {
        *self.home.write().expect("home lock poisoned") = Some(home);
        self.updates.lock().expect("updates mutex poisoned").push(home);
        Ok(())
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
