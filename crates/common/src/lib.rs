//! Shared building blocks for the cat shelter workspace: logging setup,
//! startup environment checks, common HTTP payload types and metrics.

pub mod types;
pub mod env;
pub mod metrics;

pub mod utils {
    pub mod logging;
}
