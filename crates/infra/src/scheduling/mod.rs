//! Scheduling infrastructure for journey monitoring
//!
//! Timer-driven components with explicit lifecycles:
//! - Escalation scheduler (tick, overdue-check and guardian-notify timers)
//! - Arrival poller (periodic proximity checks)
//! - Display-phase auto-revert
//!
//! All of them follow the same runtime rules: join handles are tracked,
//! cancellation is explicit, and every scheduled callback carries the epoch
//! it was armed under, so a stale timer can never mutate journey state.

pub mod arrival_poller;
pub mod error;
pub mod escalation;
pub mod revert;

pub use arrival_poller::ArrivalPoller;
pub use error::{SchedulerError, SchedulerResult};
pub use escalation::EscalationScheduler;
pub use revert::spawn_phase_revert;
