//! Splash error types

use nab_animation::AnimationError;
use thiserror::Error;

/// Errors raised while building or mounting the splash
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SplashError {
    /// A stage, spring or timer parameter was rejected
    #[error(transparent)]
    Animation(#[from] AnimationError),

    /// The configuration cannot produce a valid presentation
    #[error("invalid splash config: {0}")]
    Config(String),
}

/// Result type for splash operations
pub type Result<T> = std::result::Result<T, SplashError>;
