//! Runtime error types.

use switchyard_router::RouteError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while setting up a runtime.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An endpoint could not be registered.
    #[error("Registration error: {0}")]
    Route(#[from] RouteError),
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
