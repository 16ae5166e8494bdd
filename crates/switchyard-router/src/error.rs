//! Error types for the router.

use std::convert::Infallible;

use thiserror::Error;

/// Errors raised while registering endpoints.
///
/// Handler failures are not represented here: they are the caller's own
/// error type and travel back out of [`Router::route`](crate::Router::route)
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// A condition decoded from data was neither a literal string nor a
    /// predicate.
    #[error("invalid condition kind: expected a literal string, got {found}")]
    InvalidConditionKind {
        /// Name of the kind that was supplied instead.
        found: &'static str,
    },
}

impl From<Infallible> for RouteError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// Result type for registration operations.
pub type RouteResult<T> = Result<T, RouteError>;
