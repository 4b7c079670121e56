//! CLI error types.

use pricer_models::analytical::AnalyticalError;
use pricer_pricing::lattice::LatticeError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `crr` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Pricing parameters rejected by the lattice.
    #[error("Pricing error: {0}")]
    Lattice(#[from] LatticeError),

    /// Closed-form reference price failed.
    #[error("Analytical pricing error: {0}")]
    Analytical(#[from] AnalyticalError),

    /// Configuration could not be loaded or merged.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// JSON output failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Command line argument outside its accepted set.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
