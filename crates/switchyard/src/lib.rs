//! # Switchyard
//!
//! A small, synchronous event router for bot transports: endpoints pair a
//! condition with an action, middleware wraps actions once at registration,
//! and dispatch invokes the first endpoint whose condition holds.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────────────────────┐
//! │   Runtime    │────▶│ Router                        │
//! │ (config, log │     │  endpoint 0: "/start" ─▶ mw ─▶ action
//! │  run loop)   │     │  endpoint 1: predicate ─▶ mw ─▶ action
//! └──────────────┘     │  ...           (first match wins)
//!                      └──────────────────────────────┘
//! ```
//!
//! - **Core**: [`Context`](core::Context), the [`Update`](core::Update) accessor
//!   and caller-defined [`Fields`](core::Fields)
//! - **Router**: conditions, handlers, middleware, groups
//! - **Runtime**: configuration, logging, reply rules and the dispatch loop
//!
//! ## Quick Start
//!
//! ```rust
//! use switchyard::prelude::*;
//!
//! type Ctx = Context<String, ()>;
//!
//! struct Welcomed;
//!
//! let router: Router<Ctx> = Router::new();
//! router.handler("/start", |ctx: &mut Ctx| {
//!     ctx.fields_mut().insert(Welcomed);
//!     Ok(())
//! });
//!
//! let mut ctx = Context::new("/start".to_string(), ());
//! router.route(&mut ctx).unwrap();
//! assert!(ctx.fields().contains::<Welcomed>());
//! ```
//!
//! ## Features
//!
//! - `toml-config`: TOML configuration files (default)
//! - `yaml-config`: YAML configuration files
//! - `json-log`: JSON log output

pub use switchyard_core as core;
pub use switchyard_router as router;
pub use switchyard_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use switchyard::prelude::*;
/// ```
pub mod prelude {
    // Context and event boundary
    pub use switchyard_core::{BoxError, Context, Fields, Routable, Update};

    // Routing
    pub use switchyard_router::{
        Condition, ContextRouter, Dispatch, Group, Handler, Middleware, RouteError, Router,
    };

    // Runtime
    pub use switchyard_runtime::{RunSummary, Runtime, SwitchyardConfig};
}
