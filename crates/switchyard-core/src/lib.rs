//! # Switchyard Core
//!
//! Foundation types shared by every Switchyard crate.
//!
//! The router itself never looks inside an inbound event beyond an optional
//! text payload, and never touches the outbound transport at all. This crate
//! pins down exactly that boundary:
//!
//! - [`Update`] - the accessor a decoded inbound event must provide
//! - [`Routable`] - what the router asks of the value it dispatches on
//! - [`Context`] - the per-dispatch execution context (update, bot handle,
//!   caller-defined [`Fields`])
//!
//! ## Example
//!
//! ```rust
//! use switchyard_core::{Context, Fields, Routable};
//!
//! #[derive(Debug, Clone, Copy, PartialEq)]
//! struct Admin(bool);
//!
//! let ctx = Context::new("/start".to_string(), ())
//!     .with_fields(Fields::new().with(Admin(true)));
//!
//! assert_eq!(ctx.text(), Some("/start"));
//! assert_eq!(ctx.fields().get::<Admin>(), Some(&Admin(true)));
//! ```

pub mod context;
pub mod error;
pub mod fields;
pub mod update;

pub use context::Context;
pub use error::{BoxError, FieldError, FieldResult};
pub use fields::Fields;
pub use update::{Routable, Update};
