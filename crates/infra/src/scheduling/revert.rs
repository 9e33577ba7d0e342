//! Auto-revert for transient display phases.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use wayhome_core::{JourneyService, Transition};

/// Schedule the return of a transient display phase (`Arrived` / `Sos`) to
/// idle after its display delay.
///
/// The revert carries the epoch of the transition that entered the display
/// phase; if anything else moves the machine first (a new journey, an
/// explicit dismissal), the timer becomes a no-op.
pub fn spawn_phase_revert(
    service: Arc<JourneyService>,
    transition: Transition,
    delay: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        service.dismiss(Some(transition.epoch));
    })
}
