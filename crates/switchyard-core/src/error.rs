//! Error types shared across the Switchyard crates.

use thiserror::Error;

/// Type-erased error, the default failure type of a handler chain.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised when reading caller-defined context fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// No value of the requested type has been stored.
    #[error("context field '{0}' is not set")]
    Missing(&'static str),
}

/// Result type for field lookups.
pub type FieldResult<T> = Result<T, FieldError>;
