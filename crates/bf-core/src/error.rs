//! Core error type.
//!
//! Downstream crates wrap `CoreError` as one variant of their own error enum
//! via `#[from]`.

use thiserror::Error;

/// Errors raised while validating configuration or clock input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("invalid weather condition: {0:?}")]
    InvalidWeather(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Shorthand result type for `bf-core`.
pub type CoreResult<T> = Result<T, CoreError>;
