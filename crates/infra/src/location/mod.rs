//! Location source adapters
//!
//! The engine treats position acquisition as an external capability; these
//! adapters supply the pieces a host still needs on this side of the
//! boundary: the request time bound and a session-scoped home store.

pub mod home;
pub mod provider;

pub use home::InMemoryHomeRepository;
pub use provider::TimedLocationProvider;
