//! # Switchyard Router
//!
//! First-match event routing with eagerly composed middleware.
//!
//! - [`Condition`] - literal text or predicate deciding whether an endpoint
//!   handles a context
//! - [`Handler`] / [`Middleware`] / [`compose`] - endpoint actions and the
//!   wrappers around them
//! - [`Router`] - the ordered endpoint table and dispatch
//! - [`Group`] - a registration scope with its own middleware chain
//! - [`ContextRouter`] - a router bundled with the one context it routes
//!
//! ## Example
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use switchyard_core::{BoxError, Context, Fields};
//! use switchyard_router::{Condition, Middleware, Router};
//!
//! struct Admin;
//!
//! type Ctx = Context<String, ()>;
//!
//! let trail = Arc::new(Mutex::new(Vec::new()));
//! let seen = Arc::clone(&trail);
//!
//! let router: Router<Ctx> = Router::new();
//! router.middleware(Middleware::from_fn(move |ctx: &mut Ctx, next| {
//!     seen.lock().unwrap().push(ctx.update().clone());
//!     next.call(ctx)
//! }));
//! router
//!     .handler("/start", |_ctx: &mut Ctx| Ok(()))
//!     .handler(
//!         Condition::predicate(|ctx: &Ctx| ctx.fields().contains::<Admin>()),
//!         |_ctx: &mut Ctx| Err::<(), BoxError>("admins only past this point".into()),
//!     );
//!
//! let mut ctx = Context::new("/start".to_string(), ()).with_fields(Fields::new().with(Admin));
//! router.route(&mut ctx).unwrap();
//! assert_eq!(*trail.lock().unwrap(), vec!["/start".to_string()]);
//! ```

pub mod condition;
pub mod error;
pub mod group;
pub mod handler;
pub mod router;
pub mod scoped;

pub use condition::{Condition, PredicateFn};
pub use error::{RouteError, RouteResult};
pub use group::Group;
pub use handler::{Handler, Middleware, compose};
pub use router::{Dispatch, Router};
pub use scoped::ContextRouter;
