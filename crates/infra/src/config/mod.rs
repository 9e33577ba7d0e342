//! Configuration infrastructure

pub mod loader;

pub use loader::{load, load_from_file, probe_config_paths};
