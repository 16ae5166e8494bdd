//! The router: endpoint table and dispatch.
//!
//! A [`Router`] owns an ordered list of endpoints, each a [`Condition`] paired
//! with a handler that already has its middleware applied. Dispatch scans the
//! list in registration order and invokes the first endpoint whose condition
//! holds; nothing after it is evaluated.
//!
//! ```text
//! route(ctx)
//!   ├─ endpoint 0: condition false → next
//!   ├─ endpoint 1: condition true  → m1 → m2 → action   (stop)
//!   └─ endpoint 2: not evaluated
//! ```
//!
//! Middleware is composed when an endpoint is registered, never during
//! dispatch. Calling [`Router::middleware`] therefore only affects endpoints
//! registered afterwards.
//!
//! # Example
//!
//! ```rust
//! use switchyard_core::{BoxError, Context};
//! use switchyard_router::{Condition, Router};
//!
//! type Ctx = Context<String, ()>;
//!
//! let router: Router<Ctx> = Router::new();
//! router
//!     .handler("/start", |_ctx: &mut Ctx| Ok(()))
//!     .handler(Condition::predicate(|ctx: &Ctx| ctx.update().starts_with('/')), |_ctx: &mut Ctx| {
//!         Err::<(), BoxError>("unknown command".into())
//!     });
//!
//! assert!(router.route(&mut Context::new("/start".to_string(), ())).is_ok());
//! assert!(router.route(&mut Context::new("/nope".to_string(), ())).is_err());
//! assert!(router.route(&mut Context::new("plain text".to_string(), ())).is_ok());
//! ```
//!
//! # Concurrency
//!
//! Registration and dispatch both take `&self`; the endpoint table sits behind
//! a read-write lock, so a `Router` can be shared across threads and routed
//! from several of them at once. Conditions are evaluated while the read lock
//! is held and must not register endpoints themselves. The matched handler runs
//! after the lock is released.

use std::fmt;

use parking_lot::RwLock;
use switchyard_core::{BoxError, Routable};
use tracing::{debug, trace};

use crate::condition::Condition;
use crate::error::{RouteError, RouteResult};
use crate::group::Group;
use crate::handler::{Handler, Middleware, compose};

/// A registered (condition, composed handler) pair.
struct Endpoint<C, E> {
    condition: Condition<C>,
    action: Handler<C, E>,
}

/// The outcome of a successful dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The endpoint at this registration index handled the context.
    Matched(usize),
    /// No condition held; nothing was invoked.
    Unmatched,
}

impl Dispatch {
    /// Returns `true` if an endpoint handled the context.
    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched(_))
    }
}

/// Ordered endpoint table with first-match dispatch.
pub struct Router<C, E = BoxError> {
    endpoints: RwLock<Vec<Endpoint<C, E>>>,
    /// Root middleware, prepended to every endpoint registered after it.
    middleware: RwLock<Vec<Middleware<C, E>>>,
}

impl<C, E> Default for Router<C, E> {
    fn default() -> Self {
        Self {
            endpoints: RwLock::new(Vec::new()),
            middleware: RwLock::new(Vec::new()),
        }
    }
}

impl<C, E> Router<C, E> {
    /// Creates an empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of registered endpoints.
    pub fn endpoint_count(&self) -> usize {
        self.endpoints.read().len()
    }

    /// Returns `true` if no endpoint is registered.
    pub fn is_empty(&self) -> bool {
        self.endpoints.read().is_empty()
    }

    /// Removes every endpoint. Root middleware is kept.
    pub fn clear(&self) {
        self.endpoints.write().clear();
    }

    /// Appends middleware to the root chain.
    ///
    /// Affects only endpoints registered after this call.
    pub fn middleware(&self, middleware: Middleware<C, E>) -> &Self {
        self.middleware.write().push(middleware);
        self
    }

    /// Appends several middleware to the root chain, in order.
    pub fn middlewares<I>(&self, middleware: I) -> &Self
    where
        I: IntoIterator<Item = Middleware<C, E>>,
    {
        self.middleware.write().extend(middleware);
        self
    }

    /// Creates a registration scope with its own middleware chain.
    ///
    /// Endpoints registered through the group get the router's root chain,
    /// then the group's chain, then their own per-call middleware.
    pub fn group(&self) -> Group<'_, C, E> {
        Group::new(self)
    }
}

impl<C, E> Router<C, E>
where
    C: Routable + 'static,
    E: 'static,
{
    /// Registers an endpoint.
    pub fn handler<F>(&self, condition: impl Into<Condition<C>>, action: F) -> &Self
    where
        F: Fn(&mut C) -> Result<(), E> + Send + Sync + 'static,
    {
        self.register(condition.into(), Handler::new(action), Vec::new());
        self
    }

    /// Registers an endpoint with per-call middleware.
    ///
    /// `middleware` runs inside the root chain and outside `action`.
    pub fn handler_with<F, I>(&self, condition: impl Into<Condition<C>>, action: F, middleware: I) -> &Self
    where
        F: Fn(&mut C) -> Result<(), E> + Send + Sync + 'static,
        I: IntoIterator<Item = Middleware<C, E>>,
    {
        self.register(
            condition.into(),
            Handler::new(action),
            middleware.into_iter().collect(),
        );
        self
    }

    /// Registers an endpoint whose condition comes from data.
    ///
    /// Fails with [`RouteError::InvalidConditionKind`] if `condition` cannot
    /// be turned into a [`Condition`]; nothing is registered in that case.
    pub fn try_handler<T, F>(&self, condition: T, action: F) -> RouteResult<&Self>
    where
        T: TryInto<Condition<C>>,
        RouteError: From<T::Error>,
        F: Fn(&mut C) -> Result<(), E> + Send + Sync + 'static,
    {
        let condition = condition.try_into()?;
        self.register(condition, Handler::new(action), Vec::new());
        Ok(self)
    }

    /// Composes `action` with `[root..., chain...]` and appends the endpoint.
    pub(crate) fn register(
        &self,
        condition: Condition<C>,
        action: Handler<C, E>,
        chain: Vec<Middleware<C, E>>,
    ) {
        let effective: Vec<Middleware<C, E>> = {
            let root = self.middleware.read();
            root.iter().cloned().chain(chain).collect()
        };
        let action = compose(action, &effective);

        let mut endpoints = self.endpoints.write();
        debug!(
            index = endpoints.len(),
            condition = ?condition,
            middleware = effective.len(),
            "Registered endpoint"
        );
        endpoints.push(Endpoint { condition, action });
    }

    /// Dispatches `ctx` to the first matching endpoint.
    ///
    /// Returns `Ok(())` when nothing matches. A failure from the invoked
    /// handler chain is returned unchanged.
    pub fn route(&self, ctx: &mut C) -> Result<(), E> {
        self.dispatch(ctx).map(|_| ())
    }

    /// Like [`route`](Self::route), but reports which endpoint, if any, ran.
    pub fn dispatch(&self, ctx: &mut C) -> Result<Dispatch, E> {
        let matched = {
            let view: &C = ctx;
            let endpoints = self.endpoints.read();
            endpoints
                .iter()
                .enumerate()
                .find(|(_, endpoint)| endpoint.condition.evaluate(view))
                .map(|(index, endpoint)| {
                    trace!(
                        index,
                        kind = endpoint.condition.kind(),
                        "Endpoint condition matched"
                    );
                    (index, endpoint.action.clone())
                })
        };

        match matched {
            Some((index, action)) => {
                action.call(ctx)?;
                Ok(Dispatch::Matched(index))
            }
            None => {
                trace!("No endpoint matched");
                Ok(Dispatch::Unmatched)
            }
        }
    }
}

impl<C, E> fmt::Debug for Router<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("endpoint_count", &self.endpoints.read().len())
            .field("middleware_count", &self.middleware.read().len())
            .finish()
    }
}
