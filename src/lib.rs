//! Farecast - taxi fare prediction front end
//!
//! This library provides the backend of a single-page ride form: validated
//! ride requests, a client for the remote fare prediction endpoint, and the
//! deterministic two-point map visualization spec.

pub mod api;
pub mod config;
pub mod error;
pub mod map;
pub mod models;
pub mod predict;
pub mod web;

// Re-export core types for public API
pub use config::FarecastConfig;
pub use error::FarecastError;
pub use map::{MapSpec, build_map_spec};
pub use models::{Point, PredictionOutcome, RideRequest};
pub use predict::FareClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, FarecastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
