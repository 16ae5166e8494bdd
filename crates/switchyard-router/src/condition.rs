//! Endpoint conditions.
//!
//! A [`Condition`] decides whether an endpoint handles a given context. There
//! are exactly two kinds, and the type admits no others:
//!
//! - [`Condition::Literal`] matches when the inbound event's text is exactly
//!   equal to the literal (case-sensitive, no trimming). Events without text
//!   never match.
//! - [`Condition::Predicate`] matches when the function returns `true`.
//!
//! ```rust
//! use switchyard_core::Routable;
//! use switchyard_router::Condition;
//!
//! struct Msg(Option<&'static str>);
//!
//! impl Routable for Msg {
//!     fn text(&self) -> Option<&str> {
//!         self.0
//!     }
//! }
//!
//! let start: Condition<Msg> = "/start".into();
//! assert!(start.evaluate(&Msg(Some("/start"))));
//! assert!(!start.evaluate(&Msg(Some("/Start"))));
//! assert!(!start.evaluate(&Msg(None)));
//!
//! let long = Condition::predicate(|m: &Msg| m.0.is_some_and(|t| t.len() > 10));
//! assert!(long.evaluate(&Msg(Some("a rather long message"))));
//! ```
//!
//! Conditions that come from data (configuration files, admin commands) go
//! through [`TryFrom<&serde_json::Value>`]; anything that is not a JSON string
//! is rejected with [`RouteError::InvalidConditionKind`] before an endpoint is
//! ever registered.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use switchyard_core::Routable;

use crate::error::RouteError;

/// A type-erased predicate over the routed context.
pub type PredicateFn<C> = Arc<dyn Fn(&C) -> bool + Send + Sync>;

/// Decides whether an endpoint matches.
pub enum Condition<C> {
    /// Exact match against the event text.
    Literal(String),
    /// Arbitrary check against the whole context.
    Predicate(PredicateFn<C>),
}

impl<C> Condition<C> {
    /// A literal text condition.
    pub fn text(literal: impl Into<String>) -> Self {
        Self::Literal(literal.into())
    }

    /// A predicate condition.
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(f))
    }

    /// Returns `true` for [`Condition::Literal`].
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// Short name of the kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Literal(_) => "literal",
            Self::Predicate(_) => "predicate",
        }
    }
}

impl<C: Routable> Condition<C> {
    /// Checks the condition against `ctx`.
    pub fn evaluate(&self, ctx: &C) -> bool {
        match self {
            Self::Literal(literal) => ctx.text() == Some(literal.as_str()),
            Self::Predicate(f) => f(ctx),
        }
    }
}

impl<C> Clone for Condition<C> {
    fn clone(&self) -> Self {
        match self {
            Self::Literal(literal) => Self::Literal(literal.clone()),
            Self::Predicate(f) => Self::Predicate(Arc::clone(f)),
        }
    }
}

impl<C> fmt::Debug for Condition<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(literal) => f.debug_tuple("Literal").field(literal).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl<C> From<&str> for Condition<C> {
    fn from(literal: &str) -> Self {
        Self::Literal(literal.to_owned())
    }
}

impl<C> From<String> for Condition<C> {
    fn from(literal: String) -> Self {
        Self::Literal(literal)
    }
}

impl<C> TryFrom<&Value> for Condition<C> {
    type Error = RouteError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(literal) => Ok(Self::Literal(literal.clone())),
            other => Err(RouteError::InvalidConditionKind {
                found: json_kind(other),
            }),
        }
    }
}

impl<C> TryFrom<Value> for Condition<C> {
    type Error = RouteError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(literal) => Ok(Self::Literal(literal)),
            other => Condition::try_from(&other),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Msg(Option<String>);

    impl Routable for Msg {
        fn text(&self) -> Option<&str> {
            self.0.as_deref()
        }
    }

    fn msg(text: &str) -> Msg {
        Msg(Some(text.to_string()))
    }

    #[test]
    fn test_literal_matches_exact_text_only() {
        let cond: Condition<Msg> = "hello".into();
        assert!(cond.evaluate(&msg("hello")));
        assert!(!cond.evaluate(&msg("Hello")));
        assert!(!cond.evaluate(&msg(" hello")));
        assert!(!cond.evaluate(&msg("hello ")));
        assert!(!cond.evaluate(&Msg(None)));
    }

    #[test]
    fn test_empty_literal_matches_empty_text() {
        let cond: Condition<Msg> = Condition::text("");
        assert!(cond.evaluate(&msg("")));
        assert!(!cond.evaluate(&Msg(None)));
    }

    #[test]
    fn test_predicate_sees_context() {
        let cond = Condition::predicate(|m: &Msg| m.0.is_none());
        assert!(cond.evaluate(&Msg(None)));
        assert!(!cond.evaluate(&msg("x")));
        assert_eq!(cond.kind(), "predicate");
        assert!(!cond.is_literal());
    }

    #[test]
    fn test_condition_from_json_string() {
        let cond: Condition<Msg> = Condition::try_from(&json!("/start")).unwrap();
        assert!(cond.is_literal());
        assert!(cond.evaluate(&msg("/start")));
    }

    #[test]
    fn test_condition_from_json_rejects_other_kinds() {
        for (value, found) in [
            (json!(42), "number"),
            (json!(true), "boolean"),
            (json!(null), "null"),
            (json!(["/start"]), "array"),
            (json!({"text": "/start"}), "object"),
        ] {
            let err = Condition::<Msg>::try_from(value).unwrap_err();
            assert_eq!(err, RouteError::InvalidConditionKind { found });
        }
    }
}
