//! Scheduler error types

use thiserror::Error;
use wayhome_domain::WayhomeError;

/// Scheduler-specific errors
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Timers are already armed for a journey
    #[error("Scheduler already armed")]
    AlreadyArmed,

    /// No timers are armed
    #[error("Scheduler not armed")]
    NotArmed,
}

impl From<SchedulerError> for WayhomeError {
    fn from(err: SchedulerError) -> Self {
        match err {
            SchedulerError::AlreadyArmed | SchedulerError::NotArmed => {
                Self::InvalidInput(err.to_string())
            }
        }
    }
}

/// Convenience type alias for scheduler operations
pub type SchedulerResult<T> = Result<T, SchedulerError>;
