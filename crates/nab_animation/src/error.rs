//! Animation error types

use thiserror::Error;

/// Errors raised while building a stage schedule
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// A duration, delay, offset or physical constant was negative, zero where
    /// forbidden, or not finite
    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// An absolute step would start before its predecessor on the same scalar finished
    #[error("step {index} of `{scalar}` starts at {offset_ms}ms, before the previous stage ends at {previous_end_ms}ms")]
    StepOverlap {
        scalar: &'static str,
        index: usize,
        offset_ms: f32,
        previous_end_ms: f32,
    },

    /// Lookup of a scalar that is not part of the timeline
    #[error("unknown scalar `{0}`")]
    UnknownScalar(String),
}

impl AnimationError {
    pub(crate) fn invalid(name: &'static str, value: impl Into<f64>) -> Self {
        AnimationError::InvalidParameter {
            name,
            value: value.into(),
        }
    }
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;

/// Reject negative or non-finite millisecond values.
pub(crate) fn check_ms(name: &'static str, value: f32) -> Result<f32> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(AnimationError::invalid(name, value))
    }
}
