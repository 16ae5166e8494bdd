//! Inbound event accessors.
//!
//! Decoding the transport's wire format is somebody else's job. By the time a
//! value reaches the router it only has to answer one question: does it carry
//! a plain text payload, and if so what is it?

/// A decoded inbound event.
///
/// Implementations are provided by whatever client library talks to the
/// transport. The router only ever calls [`text`](Update::text), which backs
/// literal-string conditions.
pub trait Update: Send + Sync + 'static {
    /// Returns the textual payload of the event, if it has one.
    ///
    /// Events without a message body (joins, edits, callbacks, ...) return
    /// `None`; a literal condition never matches them.
    fn text(&self) -> Option<&str>;

    /// A short human-readable name for the event, used in logs.
    fn kind(&self) -> &'static str {
        "update"
    }
}

impl Update for String {
    fn text(&self) -> Option<&str> {
        Some(self)
    }

    fn kind(&self) -> &'static str {
        "text"
    }
}

impl Update for Option<String> {
    fn text(&self) -> Option<&str> {
        self.as_deref()
    }

    fn kind(&self) -> &'static str {
        match self {
            Some(_) => "text",
            None => "empty",
        }
    }
}

/// A value the router can dispatch on.
///
/// [`Context`](crate::Context) implements this for every [`Update`]. Callers
/// who prefer a concrete, application-specific context struct implement it
/// themselves and route that instead.
pub trait Routable {
    /// Text compared against literal conditions.
    fn text(&self) -> Option<&str>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_update_carries_text() {
        let update = "hello".to_string();
        assert_eq!(Update::text(&update), Some("hello"));
        assert_eq!(update.kind(), "text");
    }

    #[test]
    fn test_optional_update() {
        let empty: Option<String> = None;
        assert_eq!(Update::text(&empty), None);
        assert_eq!(empty.kind(), "empty");

        let full = Some(String::new());
        assert_eq!(Update::text(&full), Some(""));
    }
}
