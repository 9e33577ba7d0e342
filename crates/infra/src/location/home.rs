//! In-memory home fix store.
//!
//! Durable home coordinates live in the external profile store; hosts with
//! one supply their own `HomeLocationRepository`. This adapter keeps the fix
//! in process memory for tests and hosts that run without persistence.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use tracing::debug;

use wayhome_core::journey::ports::HomeLocationRepository;
use wayhome_domain::{Coordinate, Result};

/// Session-scoped `HomeLocationRepository`.
#[derive(Default)]
pub struct InMemoryHomeRepository {
    home: RwLock<Option<Coordinate>>,
}

impl InMemoryHomeRepository {
    /// A store with no home fix configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with a home fix.
    #[must_use]
    pub fn with_home(home: Coordinate) -> Self {
        Self { home: RwLock::new(Some(home)) }
    }
}

#[async_trait]
impl HomeLocationRepository for InMemoryHomeRepository {
    fn home_location(&self) -> Option<Coordinate> {
        *self.home.read().unwrap_or_else(PoisonError::into_inner)
    }

    async fn update_home_location(&self, home: Coordinate) -> Result<()> {
        *self.home.write().unwrap_or_else(PoisonError::into_inner) = Some(home);
        debug!(latitude = home.latitude, longitude = home.longitude, "Home fix updated");
        Ok(())
    }
}
