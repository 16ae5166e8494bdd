//! A router bundled with the single context it dispatches.
//!
//! Some callers build their endpoints fresh for every inbound event, right
//! next to the event itself. [`ContextRouter`] keeps the two together: it
//! owns one context and one [`Router`], exposes the full registration API
//! through `Deref`, and routes its own context with [`ContextRouter::route`].

use std::ops::Deref;

use switchyard_core::{BoxError, Routable};

use crate::router::{Dispatch, Router};

/// One context plus the endpoints that will handle it.
pub struct ContextRouter<C, E = BoxError> {
    ctx: C,
    router: Router<C, E>,
}

impl<C, E> ContextRouter<C, E> {
    /// Wraps `ctx` with an empty router.
    pub fn new(ctx: C) -> Self {
        Self {
            ctx,
            router: Router::new(),
        }
    }

    /// The owned context.
    pub fn context(&self) -> &C {
        &self.ctx
    }

    /// Mutable access to the owned context.
    pub fn context_mut(&mut self) -> &mut C {
        &mut self.ctx
    }

    /// Drops the endpoints and returns the context.
    pub fn into_context(self) -> C {
        self.ctx
    }
}

impl<C, E> ContextRouter<C, E>
where
    C: Routable + 'static,
    E: 'static,
{
    /// Dispatches the owned context.
    pub fn route(&mut self) -> Result<(), E> {
        self.router.route(&mut self.ctx)
    }

    /// Dispatches the owned context and reports which endpoint ran.
    pub fn dispatch(&mut self) -> Result<Dispatch, E> {
        self.router.dispatch(&mut self.ctx)
    }
}

impl<C, E> Deref for ContextRouter<C, E> {
    type Target = Router<C, E>;

    fn deref(&self) -> &Self::Target {
        &self.router
    }
}
