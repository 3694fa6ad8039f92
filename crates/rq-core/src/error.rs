//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// The top-level error type for `rq-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A rate, horizon, or similar parameter was zero, negative, or non-finite.
    #[error("{param} must be positive and finite, got {value}")]
    NonPositiveParam { param: &'static str, value: f64 },
}

/// Shorthand result type for all `rq-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
