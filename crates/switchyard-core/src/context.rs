//! The execution context handed to every handler and middleware.
//!
//! One [`Context`] is built per inbound event by the caller's event loop and
//! lives exactly as long as the dispatch that consumes it. It carries:
//!
//! - the decoded inbound event (`U`)
//! - a handle to the outbound transport (`B`), passed through untouched
//! - caller-defined [`Fields`], populated before dispatch and freely mutated
//!   by handlers and middleware during it
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use switchyard_core::{Context, Fields};
//!
//! struct ConsoleBot;
//!
//! struct Locale(&'static str);
//!
//! let mut ctx = Context::new(Some("/help".to_string()), Arc::new(ConsoleBot));
//! ctx.fields_mut().insert(Locale("en"));
//! assert_eq!(ctx.fields().get::<Locale>().map(|l| l.0), Some("en"));
//! ```

use crate::fields::Fields;
use crate::update::{Routable, Update};

/// Per-dispatch execution context.
pub struct Context<U, B> {
    update: U,
    bot: B,
    fields: Fields,
}

impl<U, B> Context<U, B> {
    /// Creates a context with an empty field bag.
    pub fn new(update: U, bot: B) -> Self {
        Self {
            update,
            bot,
            fields: Fields::new(),
        }
    }

    /// Replaces the field bag (builder style).
    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields = fields;
        self
    }

    /// The inbound event.
    pub fn update(&self) -> &U {
        &self.update
    }

    /// The outbound transport handle.
    pub fn bot(&self) -> &B {
        &self.bot
    }

    /// Caller-defined fields.
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Mutable access to the caller-defined fields.
    pub fn fields_mut(&mut self) -> &mut Fields {
        &mut self.fields
    }

    /// Splits the context back into its parts.
    pub fn into_parts(self) -> (U, B, Fields) {
        (self.update, self.bot, self.fields)
    }
}

impl<U: Update, B> Routable for Context<U, B> {
    fn text(&self) -> Option<&str> {
        self.update.text()
    }
}

impl<U: Update, B> std::fmt::Debug for Context<U, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("kind", &self.update.kind())
            .field("text", &self.update.text())
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoText;

    impl Update for NoText {
        fn text(&self) -> Option<&str> {
            None
        }
    }

    #[derive(Debug, PartialEq)]
    struct Counter(u32);

    #[test]
    fn test_context_exposes_update_text() {
        let ctx = Context::new("hello".to_string(), ());
        assert_eq!(ctx.text(), Some("hello"));
        assert_eq!(ctx.update(), "hello");
    }

    #[test]
    fn test_context_without_text() {
        let ctx = Context::new(NoText, ());
        assert_eq!(ctx.text(), None);
    }

    #[test]
    fn test_fields_are_mutable_through_context() {
        let mut ctx = Context::new(NoText, 7_u8).with_fields(Fields::new().with(Counter(1)));
        if let Some(c) = ctx.fields_mut().get_mut::<Counter>() {
            c.0 += 1;
        }
        assert_eq!(*ctx.bot(), 7);

        let (_, bot, fields) = ctx.into_parts();
        assert_eq!(bot, 7);
        assert_eq!(fields.get::<Counter>(), Some(&Counter(2)));
    }
}
