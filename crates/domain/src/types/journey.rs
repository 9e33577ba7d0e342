//! Journey monitoring types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Phase of the journey state machine.
///
/// Exactly one phase is current at any time. `Arrived` and `Sos` are
/// transient display phases that revert to `Idle` after a short delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JourneyPhase {
    /// No journey underway.
    Idle,
    /// A journey is being monitored and is within its estimate.
    Traveling,
    /// The overdue check fired and awaits acknowledgement.
    Checking,
    /// The person reached home; shown briefly before returning to idle.
    Arrived,
    /// A distress signal was raised; shown briefly before returning to idle.
    Sos,
}

impl JourneyPhase {
    /// True while escalation timers and arrival polling should be running.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Traveling | Self::Checking)
    }
}

impl std::fmt::Display for JourneyPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Traveling => "traveling",
            Self::Checking => "checking",
            Self::Arrived => "arrived",
            Self::Sos => "sos",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for JourneyPhase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "idle" => Ok(Self::Idle),
            "traveling" => Ok(Self::Traveling),
            "checking" => Ok(Self::Checking),
            "arrived" => Ok(Self::Arrived),
            "sos" => Ok(Self::Sos),
            other => Err(format!("Invalid JourneyPhase: {other}")),
        }
    }
}

/// Read-only view of the live journey state.
///
/// Handed to the presentation layer on every tick and on demand. All timing
/// fields are derived from the monotonic clock at read time; nothing here is
/// ever persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JourneySnapshot {
    /// Current phase of the state machine.
    pub phase: JourneyPhase,
    /// Correlation id for the journey, present iff one is underway.
    pub journey_id: Option<Uuid>,
    /// Wall-clock start of the journey, telemetry only.
    pub started_at: Option<DateTime<Utc>>,
    /// Minutes since the journey started.
    pub elapsed_minutes: f64,
    /// Estimate fixed at journey start, in minutes.
    pub estimated_minutes: f64,
    /// Whether elapsed time exceeds the estimate plus the grace period.
    pub is_overtime: bool,
    /// Minutes past the estimate plus grace period, floored at zero.
    pub overtime_minutes: f64,
    /// True between the overdue check firing and its resolution.
    pub check_pending: bool,
}

impl JourneySnapshot {
    /// Snapshot of a machine with no journey underway.
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            phase: JourneyPhase::Idle,
            journey_id: None,
            started_at: None,
            elapsed_minutes: 0.0,
            estimated_minutes: 0.0,
            is_overtime: false,
            overtime_minutes: 0.0,
            check_pending: false,
        }
    }
}

impl Default for JourneySnapshot {
    fn default() -> Self {
        Self::idle()
    }
}
