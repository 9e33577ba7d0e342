//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Wayhome
///
/// The three location variants are the classified outcomes of a position
/// request; callers surface them and never retry automatically. "Home not
/// configured" is deliberately not an error: the estimator falls back to a
/// fixed default so a journey can always start.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum WayhomeError {
    /// Location permission was denied by the person or the platform.
    #[error("Location permission denied")]
    PermissionDenied,

    /// The platform could not produce a position fix.
    #[error("Position unavailable: {0}")]
    PositionUnavailable(String),

    /// A position request exceeded its time bound.
    #[error("Location request timed out after {0}s")]
    LocationTimeout(u64),

    /// Configuration could not be loaded or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An operation was invoked with arguments it cannot accept.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An invariant the engine relies on was violated.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Wayhome operations
pub type Result<T> = std::result::Result<T, WayhomeError>;
