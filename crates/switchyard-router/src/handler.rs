//! Handlers, middleware, and the chain composer.
//!
//! A [`Handler`] is the terminal action of an endpoint. A [`Middleware`]
//! turns one handler into another, which is how cross-cutting behaviour
//! (logging, auth, deadlines, ...) gets wrapped around it. [`compose`] folds
//! an ordered chain of middleware over a handler so that the first entry ends
//! up outermost:
//!
//! ```text
//! compose(h, [m1, m2, m3]) == m1(m2(m3(h)))
//! invocation order:           m1 -> m2 -> m3 -> h
//! ```
//!
//! Middleware also implements [`tower_layer::Layer`], so anything that already
//! speaks in layers can be stacked with [`tower_layer::Stack`] and applied the
//! same way.

use std::fmt;
use std::sync::Arc;

use tower_layer::Layer;

type HandlerFn<C, E> = dyn Fn(&mut C) -> Result<(), E> + Send + Sync;
type WrapFn<C, E> = dyn Fn(Handler<C, E>) -> Handler<C, E> + Send + Sync;

// ============================================================================
// Handler
// ============================================================================

/// A type-erased, cheaply cloneable endpoint action.
pub struct Handler<C, E> {
    inner: Arc<HandlerFn<C, E>>,
}

impl<C, E> Handler<C, E> {
    /// Wraps a function as a handler.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut C) -> Result<(), E> + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Invokes the handler.
    pub fn call(&self, ctx: &mut C) -> Result<(), E> {
        (self.inner)(ctx)
    }

    /// Returns `true` if both values share the same underlying function.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<C, E> Clone for Handler<C, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C, E> fmt::Debug for Handler<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler").finish_non_exhaustive()
    }
}

// ============================================================================
// Middleware
// ============================================================================

/// A function from handler to handler.
pub struct Middleware<C, E> {
    wrap: Arc<WrapFn<C, E>>,
}

impl<C: 'static, E: 'static> Middleware<C, E> {
    /// Creates middleware from a handler-transforming function.
    ///
    /// ```rust
    /// use switchyard_router::{Handler, Middleware};
    ///
    /// let noop: Middleware<u32, ()> = Middleware::new(|next| next);
    /// let h = noop.apply(Handler::new(|n: &mut u32| {
    ///     *n += 1;
    ///     Ok(())
    /// }));
    /// let mut n = 0;
    /// h.call(&mut n).unwrap();
    /// assert_eq!(n, 1);
    /// ```
    pub fn new<F>(wrap: F) -> Self
    where
        F: Fn(Handler<C, E>) -> Handler<C, E> + Send + Sync + 'static,
    {
        Self {
            wrap: Arc::new(wrap),
        }
    }

    /// Creates middleware from a function that receives the context and the
    /// rest of the chain.
    ///
    /// The function decides whether, and when, to call `next`. Returning
    /// without calling it short-circuits everything inside.
    ///
    /// ```rust
    /// use switchyard_router::Middleware;
    ///
    /// let log: Middleware<Vec<&'static str>, ()> = Middleware::from_fn(|trail: &mut Vec<&'static str>, next| {
    ///     trail.push("before");
    ///     let result = next.call(trail);
    ///     trail.push("after");
    ///     result
    /// });
    /// # let _ = log;
    /// ```
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&mut C, &Handler<C, E>) -> Result<(), E> + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        Self::new(move |next| {
            let f = Arc::clone(&f);
            Handler::new(move |ctx: &mut C| f(ctx, &next))
        })
    }

    /// Creates middleware from any [`Layer`] that maps handlers to handlers.
    pub fn from_layer<L>(layer: L) -> Self
    where
        L: Layer<Handler<C, E>, Service = Handler<C, E>> + Send + Sync + 'static,
    {
        Self::new(move |next| layer.layer(next))
    }
}

impl<C, E> Middleware<C, E> {
    /// Wraps `handler` with this middleware.
    pub fn apply(&self, handler: Handler<C, E>) -> Handler<C, E> {
        (self.wrap)(handler)
    }
}

impl<C, E> Clone for Middleware<C, E> {
    fn clone(&self) -> Self {
        Self {
            wrap: Arc::clone(&self.wrap),
        }
    }
}

impl<C, E> fmt::Debug for Middleware<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Middleware").finish_non_exhaustive()
    }
}

impl<C, E> Layer<Handler<C, E>> for Middleware<C, E> {
    type Service = Handler<C, E>;

    fn layer(&self, inner: Handler<C, E>) -> Self::Service {
        self.apply(inner)
    }
}

// ============================================================================
// Composer
// ============================================================================

/// Wraps `handler` with `chain`, first entry outermost.
///
/// Pure: no I/O, and composing the same inputs twice yields handlers that
/// behave identically.
pub fn compose<C, E>(handler: Handler<C, E>, chain: &[Middleware<C, E>]) -> Handler<C, E> {
    chain
        .iter()
        .rev()
        .fold(handler, |inner, middleware| middleware.apply(inner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_layer::{Identity, Stack};

    type Trail = Vec<String>;

    fn tag(name: &'static str) -> Middleware<Trail, String> {
        Middleware::from_fn(move |trail: &mut Trail, next| {
            trail.push(format!("{name}:in"));
            let result = next.call(trail);
            trail.push(format!("{name}:out"));
            result
        })
    }

    fn terminal() -> Handler<Trail, String> {
        Handler::new(|trail: &mut Trail| {
            trail.push("handler".to_string());
            Ok(())
        })
    }

    #[test]
    fn test_compose_empty_chain_is_identity() {
        let h = terminal();
        let composed = compose(h.clone(), &[]);
        assert!(composed.ptr_eq(&h));
    }

    #[test]
    fn test_compose_first_middleware_is_outermost() {
        let h = compose(terminal(), &[tag("m1"), tag("m2"), tag("m3")]);
        let mut trail = Trail::new();
        h.call(&mut trail).unwrap();
        assert_eq!(
            trail,
            vec![
                "m1:in", "m2:in", "m3:in", "handler", "m3:out", "m2:out", "m1:out"
            ]
        );
    }

    #[test]
    fn test_compose_is_repeatable() {
        let chain = [tag("a"), tag("b")];
        let first = compose(terminal(), &chain);
        let second = compose(terminal(), &chain);

        let mut t1 = Trail::new();
        let mut t2 = Trail::new();
        assert_eq!(first.call(&mut t1), second.call(&mut t2));
        assert_eq!(t1, t2);
    }

    #[test]
    fn test_middleware_can_short_circuit() {
        let deny: Middleware<Trail, String> =
            Middleware::from_fn(|_trail, _next| Err("denied".to_string()));
        let h = compose(terminal(), &[tag("outer"), deny]);

        let mut trail = Trail::new();
        assert_eq!(h.call(&mut trail), Err("denied".to_string()));
        assert_eq!(trail, vec!["outer:in", "outer:out"]);
    }

    #[test]
    fn test_middleware_from_layer_stack() {
        let stack = Stack::new(tag("inner"), Stack::new(tag("outer"), Identity::new()));
        let h = Middleware::from_layer(stack).apply(terminal());

        let mut trail = Trail::new();
        h.call(&mut trail).unwrap();
        assert_eq!(
            trail,
            vec!["outer:in", "inner:in", "handler", "inner:out", "outer:out"]
        );
    }
}
