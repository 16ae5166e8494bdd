//! Switchyard Runtime - the caller-side layer around the router core.
//!
//! This crate provides:
//! - Layered configuration loading and validation ([`config`])
//! - Logging setup on `tracing-subscriber` ([`logging`])
//! - Declarative reply endpoints from configuration ([`register_replies`])
//! - A synchronous dispatch loop ([`Runtime`])
//!
//! ```rust,ignore
//! use switchyard_runtime::{Runtime, config::ConfigLoader};
//!
//! let config = ConfigLoader::new().with_current_dir().load()?;
//! let runtime = Runtime::from_config(&config)?;
//! runtime.load_replies(|ctx: &mut Ctx, text| ctx.bot().send(text))?;
//! runtime.run(contexts);
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod replies;
pub mod runtime;

pub use config::{ConfigError, ConfigLoader, ConfigResult, ReplyRule, RouterConfig, SwitchyardConfig};
pub use error::{RuntimeError, RuntimeResult};
pub use logging::{LoggingBuilder, SpanEvents};
pub use replies::register_replies;
pub use runtime::{RunSummary, Runtime};

// Re-export tracing for use by other crates
pub use tracing;
pub use tracing_subscriber;
