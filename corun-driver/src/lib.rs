//! corun driver - runs suspendable computations.
//!
//! This crate provides the execution side of corun:
//! - The [`Driver`] that starts a computation, awaits every awaitable it
//!   yields, and resumes it with each result
//! - Failure injection: a provider's failure is raised inside the
//!   computation, and only escapes to the caller if unhandled
//! - Tracing subscriber setup for binaries embedding the driver
//!
//! # Example
//!
//! ```ignore
//! use corun_core::prelude::*;
//! use corun_driver::run;
//!
//! let (deferred, resolver) = Deferred::new();
//! tokio::spawn(async move { resolver.resolve("alpha") });
//!
//! let mut pending = Some(deferred);
//! let value = run(move || {
//!     computation::from_fn(move |input| match input {
//!         Resume::Start => Step::Yield(pending.take().unwrap().into()),
//!         Resume::Value(v) => Step::Complete(Some(v)),
//!         Resume::Failure(f) => Step::Fail(f),
//!     })
//! })
//! .await?;
//! ```

#![warn(missing_docs)]

pub mod driver;
pub mod observability;

pub use driver::{Driver, DriverConfig, RunSummary, run};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::driver::{Driver, DriverConfig, RunSummary, run};
    pub use crate::observability::{LogFormat, TracingConfig, TracingGuard, init_tracing};
    pub use corun_core::prelude::*;
}
