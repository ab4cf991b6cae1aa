//! Application error types

use nab_splash::SplashError;
use std::path::PathBuf;
use thiserror::Error;

/// A form was submitted without every required field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

/// A transport call failed; passed through unchanged by the logging wrapper
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("request to {url} failed: {message}")]
pub struct TransportFailure {
    pub url: String,
    pub message: String,
}

impl TransportFailure {
    pub fn new(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            message: message.into(),
        }
    }
}

/// Errors surfaced by the app layer
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Transport(#[from] TransportFailure),

    #[error(transparent)]
    Splash(#[from] SplashError),

    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type for app operations
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_lists_names() {
        let err = FormError::MissingFields(vec!["service", "phone"]);
        assert_eq!(err.to_string(), "missing required fields: service, phone");
    }

    #[test]
    fn test_form_error_converts() {
        let err: AppError = FormError::MissingFields(vec!["name"]).into();
        assert!(matches!(err, AppError::Form(_)));
    }
}
