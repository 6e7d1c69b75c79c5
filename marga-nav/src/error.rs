//! Error types for MargaNav.
//!
//! Failing to find a route is not an error: the planner reports it through
//! its `Blocked` event. Errors here cover configuration and the runtime
//! thread boundary.

use thiserror::Error;

/// Invalid planner configuration value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("tick period must be greater than zero")]
    ZeroTickPeriod,

    #[error("collision hysteresis must be at least 1")]
    ZeroHysteresis,

    #[error("hitbox width must be finite and non-negative, got {0}")]
    InvalidHitboxWidth(f32),

    #[error("segment completion threshold must be finite and positive, got {0}")]
    InvalidCompletionThreshold(f32),
}

/// MargaNav error type
#[derive(Error, Debug)]
pub enum MargaError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Planner thread panicked")]
    ThreadPanicked,

    #[error("Planner thread is no longer running")]
    ChannelClosed,
}

impl MargaError {
    /// Whether retrying the failed operation may succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, MargaError::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, MargaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts() {
        let err: MargaError = ConfigError::ZeroHysteresis.into();
        assert!(matches!(err, MargaError::Config(ConfigError::ZeroHysteresis)));
        assert!(!err.is_recoverable());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: collision hysteresis must be at least 1"
        );
    }
}
