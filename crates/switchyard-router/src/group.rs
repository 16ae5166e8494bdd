//! Registration scopes.
//!
//! A [`Group`] is not a second routing table: it is a view onto a [`Router`]
//! that carries its own middleware chain and forwards every registration to
//! the router with that chain attached. Groups nest.
//!
//! ```rust
//! use switchyard_core::{BoxError, Context};
//! use switchyard_router::{Middleware, Router};
//!
//! type Ctx = Context<String, ()>;
//!
//! fn audit() -> Middleware<Ctx, BoxError> {
//!     Middleware::from_fn(|ctx: &mut Ctx, next| next.call(ctx))
//! }
//!
//! let router: Router<Ctx> = Router::new();
//! let mut admin = router.group();
//! admin.middleware(audit());
//! admin.handler("/ban", |_ctx: &mut Ctx| Ok(()));
//!
//! let moderators = admin.group();
//! moderators.handler("/mute", |_ctx: &mut Ctx| Ok(()));
//!
//! assert_eq!(router.endpoint_count(), 2);
//! ```
//!
//! # Inheritance
//!
//! For an endpoint registered through a group, the effective chain is
//!
//! ```text
//! [router root chain (as of registration)] ++ [group chain] ++ [per-call middleware]
//! ```
//!
//! A child group copies its parent's chain when [`Group::group`] is called.
//! Middleware added to the parent afterwards does not reach the child. The
//! router's root chain is not copied: it is read whenever an endpoint is
//! registered, through any group.

use std::fmt;

use switchyard_core::Routable;

use crate::condition::Condition;
use crate::handler::{Handler, Middleware};
use crate::router::Router;

/// A middleware scope that forwards registrations to its router.
pub struct Group<'r, C, E> {
    router: &'r Router<C, E>,
    middleware: Vec<Middleware<C, E>>,
}

impl<'r, C, E> Group<'r, C, E> {
    pub(crate) fn new(router: &'r Router<C, E>) -> Self {
        Self {
            router,
            middleware: Vec::new(),
        }
    }

    /// Appends middleware to this group's chain.
    ///
    /// Affects endpoints registered through this group afterwards, and child
    /// groups created afterwards.
    pub fn middleware(&mut self, middleware: Middleware<C, E>) -> &mut Self {
        self.middleware.push(middleware);
        self
    }

    /// Appends several middleware to this group's chain, in order.
    pub fn middlewares<I>(&mut self, middleware: I) -> &mut Self
    where
        I: IntoIterator<Item = Middleware<C, E>>,
    {
        self.middleware.extend(middleware);
        self
    }

    /// Creates a child group starting from a copy of this group's chain.
    pub fn group(&self) -> Group<'r, C, E> {
        Group {
            router: self.router,
            middleware: self.middleware.clone(),
        }
    }

    /// The router registrations are forwarded to.
    pub fn router(&self) -> &'r Router<C, E> {
        self.router
    }

    /// Number of middleware in this group's own chain.
    pub fn middleware_count(&self) -> usize {
        self.middleware.len()
    }
}

impl<C, E> Group<'_, C, E>
where
    C: Routable + 'static,
    E: 'static,
{
    /// Registers an endpoint with this group's middleware.
    pub fn handler<F>(&self, condition: impl Into<Condition<C>>, action: F) -> &Self
    where
        F: Fn(&mut C) -> Result<(), E> + Send + Sync + 'static,
    {
        self.handler_with(condition, action, [])
    }

    /// Registers an endpoint with this group's middleware plus `middleware`.
    pub fn handler_with<F, I>(&self, condition: impl Into<Condition<C>>, action: F, middleware: I) -> &Self
    where
        F: Fn(&mut C) -> Result<(), E> + Send + Sync + 'static,
        I: IntoIterator<Item = Middleware<C, E>>,
    {
        let chain = self.middleware.iter().cloned().chain(middleware).collect();
        self.router
            .register(condition.into(), Handler::new(action), chain);
        self
    }
}

impl<C, E> fmt::Debug for Group<'_, C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("middleware_count", &self.middleware.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use switchyard_core::Context;

    type Ctx = Context<Option<String>, ()>;
    type Log = Arc<Mutex<Vec<&'static str>>>;

    fn ctx(text: &str) -> Ctx {
        Context::new(Some(text.to_string()), ())
    }

    fn mark(log: &Log, name: &'static str) -> Middleware<Ctx, String> {
        let log = Arc::clone(log);
        Middleware::from_fn(move |ctx: &mut Ctx, next| {
            log.lock().unwrap().push(name);
            next.call(ctx)
        })
    }

    fn action(log: &Log) -> impl Fn(&mut Ctx) -> Result<(), String> + Send + Sync + 'static {
        let log = Arc::clone(log);
        move |_ctx: &mut Ctx| {
            log.lock().unwrap().push("handler");
            Ok(())
        }
    }

    fn run(router: &Router<Ctx, String>, log: &Log, text: &str) -> Vec<&'static str> {
        log.lock().unwrap().clear();
        router.route(&mut ctx(text)).unwrap();
        log.lock().unwrap().clone()
    }

    #[test]
    fn test_group_inherits_root_then_own_then_inline() {
        let log = Log::default();
        let router = Router::new();
        router.middleware(mark(&log, "mA"));

        let mut group = router.group();
        group.middleware(mark(&log, "mB"));
        group.handler_with("x", action(&log), [mark(&log, "inline")]);

        assert_eq!(run(&router, &log, "x"), vec!["mA", "mB", "inline", "handler"]);
    }

    #[test]
    fn test_group_sees_root_middleware_added_before_registration() {
        let log = Log::default();
        let router = Router::new();
        let group = router.group();

        group.handler("before", action(&log));
        router.middleware(mark(&log, "mA"));
        group.handler("after", action(&log));

        assert_eq!(run(&router, &log, "before"), vec!["handler"]);
        assert_eq!(run(&router, &log, "after"), vec!["mA", "handler"]);
    }

    #[test]
    fn test_group_middleware_not_retroactive() {
        let log = Log::default();
        let router = Router::new();
        let mut group = router.group();

        group.handler("early", action(&log));
        group.middleware(mark(&log, "mB"));
        group.handler("late", action(&log));

        assert_eq!(run(&router, &log, "early"), vec!["handler"]);
        assert_eq!(run(&router, &log, "late"), vec!["mB", "handler"]);
    }

    #[test]
    fn test_child_group_snapshots_parent_chain() {
        let log = Log::default();
        let router = Router::new();
        let mut parent = router.group();
        parent.middleware(mark(&log, "p1"));

        let mut child = parent.group();
        parent.middleware(mark(&log, "p2"));
        child.middleware(mark(&log, "c1"));

        child.handler("child", action(&log));
        parent.handler("parent", action(&log));

        assert_eq!(run(&router, &log, "child"), vec!["p1", "c1", "handler"]);
        assert_eq!(run(&router, &log, "parent"), vec!["p1", "p2", "handler"]);
        assert_eq!(child.middleware_count(), 2);
    }

    #[test]
    fn test_group_middleware_does_not_leak_to_router() {
        let log = Log::default();
        let router = Router::new();
        let mut group = router.group();
        group.middleware(mark(&log, "scoped"));
        group.handler("in", action(&log));
        router.handler("out", action(&log));

        assert_eq!(run(&router, &log, "in"), vec!["scoped", "handler"]);
        assert_eq!(run(&router, &log, "out"), vec!["handler"]);
    }

    #[test]
    fn test_groups_share_one_endpoint_table() {
        let log = Log::default();
        let router = Router::new();
        let first = router.group();
        let second = router.group();

        second.handler("x", action(&log));
        first.handler("x", action(&log));
        router.handler("x", action(&log));

        assert_eq!(router.endpoint_count(), 3);
        assert!(std::ptr::eq(first.router(), &router));
        assert_eq!(router.dispatch(&mut ctx("x")), Ok(crate::Dispatch::Matched(0)));
    }
}
