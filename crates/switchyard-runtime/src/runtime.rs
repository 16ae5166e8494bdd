//! A synchronous driver around a [`Router`].
//!
//! The router core is a pure dispatch function; somebody still has to decode
//! events, build contexts, call `route` once per event and decide what to do
//! with failures. [`Runtime`] is that somebody for the common case:
//!
//! ```rust,ignore
//! use switchyard_runtime::{Runtime, config::load_config};
//!
//! let config = load_config()?;
//! let runtime = Runtime::from_config(&config)?;
//! runtime.router().handler("/ping", |ctx: &mut Ctx| ctx.bot().reply(ctx.update(), "pong"));
//!
//! let summary = runtime.run(updates.map(|u| Context::new(u, bot.clone())));
//! println!("{summary:?}");
//! ```
//!
//! Everything here runs on the caller's thread. There are no retries and no
//! background work; a failing handler is logged and the next event proceeds.

use std::fmt::Display;
use std::sync::Arc;

use switchyard_core::{BoxError, Routable};
use switchyard_router::{Dispatch, Router};
use tracing::{Level, debug, error, info, span, trace};

use crate::config::{RouterConfig, SwitchyardConfig, validate_config};
use crate::error::RuntimeResult;
use crate::logging;
use crate::replies::register_replies;

/// Counters reported by [`Runtime::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub failed: usize,
}

/// Owns a shared [`Router`] and dispatches contexts through it.
pub struct Runtime<C, E = BoxError> {
    router: Arc<Router<C, E>>,
    config: RouterConfig,
}

impl<C, E> Runtime<C, E> {
    /// Creates a runtime with an empty router.
    pub fn new(config: RouterConfig) -> Self {
        Self::with_router(config, Arc::new(Router::new()))
    }

    /// Creates a runtime around an existing router.
    pub fn with_router(config: RouterConfig, router: Arc<Router<C, E>>) -> Self {
        Self { router, config }
    }

    /// Creates a runtime from a full configuration.
    ///
    /// Validates `config` and installs the global logging subscriber (a
    /// no-op if one is already installed). Reply rules are not registered
    /// here; see [`Runtime::load_replies`].
    pub fn from_config(config: &SwitchyardConfig) -> RuntimeResult<Self> {
        validate_config(config)?;
        logging::init_from_config(&config.logging);

        info!(
            router = %config.router.name,
            log_level = %config.logging.level,
            replies = config.router.replies.len(),
            "Runtime configured"
        );

        Ok(Self::new(config.router.clone()))
    }

    /// The router endpoints are registered on.
    pub fn router(&self) -> &Router<C, E> {
        &self.router
    }

    /// A shared handle to the router.
    pub fn router_arc(&self) -> Arc<Router<C, E>> {
        Arc::clone(&self.router)
    }

    /// The router settings in effect.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }
}

impl<C, E> Runtime<C, E>
where
    C: Routable + 'static,
    E: Display + 'static,
{
    /// Registers the configured reply rules, using `send` to deliver replies.
    pub fn load_replies<S>(&self, send: S) -> RuntimeResult<usize>
    where
        S: Fn(&mut C, &str) -> Result<(), E> + Send + Sync + 'static,
    {
        Ok(register_replies(&self.router, &self.config.replies, send)?)
    }

    /// Routes one context.
    ///
    /// The handler's error is logged and then returned unchanged.
    pub fn dispatch(&self, ctx: &mut C) -> Result<Dispatch, E> {
        let span = span!(Level::DEBUG, "dispatch", router = %self.config.name);
        let _enter = span.enter();

        match self.router.dispatch(ctx) {
            Ok(Dispatch::Matched(index)) => {
                debug!(endpoint = index, "Event handled");
                Ok(Dispatch::Matched(index))
            }
            Ok(Dispatch::Unmatched) => {
                if self.config.log_unmatched {
                    info!(text = ?ctx.text(), "No endpoint matched event");
                } else {
                    trace!(text = ?ctx.text(), "No endpoint matched event");
                }
                Ok(Dispatch::Unmatched)
            }
            Err(e) => {
                error!(error = %e, "Handler failed");
                Err(e)
            }
        }
    }

    /// Routes every context from `contexts` in order.
    ///
    /// Failures are logged and counted; processing continues with the next
    /// context.
    pub fn run<I>(&self, contexts: I) -> RunSummary
    where
        I: IntoIterator<Item = C>,
    {
        let mut summary = RunSummary::default();
        for mut ctx in contexts {
            summary.processed += 1;
            match self.dispatch(&mut ctx) {
                Ok(Dispatch::Matched(_)) => summary.matched += 1,
                Ok(Dispatch::Unmatched) => summary.unmatched += 1,
                Err(_) => summary.failed += 1,
            }
        }

        info!(
            processed = summary.processed,
            matched = summary.matched,
            unmatched = summary.unmatched,
            failed = summary.failed,
            "Run finished"
        );
        summary
    }
}

impl<C, E> std::fmt::Debug for Runtime<C, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("router", &self.router)
            .field("config", &self.config)
            .finish()
    }
}
