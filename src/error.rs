// error.rs - Configuration errors, all raised before any step runs

use thiserror::Error;

/// Rejected run parameters. Every variant is a kind of invalid
/// configuration; nothing can fail once a run has started.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid configuration: lattice size must be > 0")]
    ZeroSize,

    #[error("invalid configuration: sampling interval must be > 0")]
    ZeroSamplingInterval,

    #[error("invalid configuration: temperature must be a finite value > 0, got {0}")]
    NonPositiveTemperature(f64),

    #[error("invalid configuration: coupling constant must be nonzero")]
    ZeroCoupling,

    #[error("invalid configuration: coupling constant must be finite, got {0}")]
    NonFiniteCoupling(f64),

    /// Temperature sweep bounds that do not describe a usable grid.
    #[error("invalid configuration: temperature grid {0}")]
    InvalidTemperatureGrid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
