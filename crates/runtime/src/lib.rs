//! Per-run shadow runtime.
//!
//! Pairs real instances with the shadows the catalog selects for them, keeps
//! those pairings stable for one run, and tears everything down between runs.
//!
//! ```rust,ignore
//! let runtime = Runtime::new(RunConfig::default().with_application("android.app.Application"));
//! runtime.begin_run(ApiLevel(28))?;
//! let _guard = runtime.enter();
//!
//! let camera = new_instance_of(&CAMERA)?;
//! let shadow: Rc<ShadowCamera> = shadow_of(&camera)?;
//!
//! runtime.end_run()?;
//! ```
//!
//! # Sub-modules
//!
//! - [`builder`] - allocation with and without declared initializers
//! - [`config`] - run configuration
//! - [`dispatch`] - interception plans
//! - [`runtime`] - run lifecycle and the association API
//! - [`current`] - thread-current runtime accessors

pub mod builder;
pub mod config;
pub mod current;
pub mod dispatch;
pub mod error;
mod lazy;
pub mod runtime;
mod store;

pub use config::{RunConfig, ShadowOverride};
pub use current::{EnterGuard, application, application_as, current, extract, intercept, new_instance_of, shadow_of};
pub use dispatch::Plan;
pub use error::{Result, RuntimeError};
pub use lazy::ApplicationSupplier;
pub use runtime::Runtime;

#[cfg(test)]
pub(crate) mod test_fixtures;
