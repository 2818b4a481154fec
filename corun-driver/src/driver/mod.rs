//! The coroutine driver.
//!
//! This module provides the suspend/resume loop:
//! - [`Driver`] - runs one computation per call, to completion or failure
//! - [`DriverConfig`] - labels, step limit, payload logging
//! - [`run`] - shorthand for a default driver
//!
//! Deferred results and callback-accepting operations are both awaited
//! through a single internal adapter, so the loop itself never branches on
//! the awaitable's shape.

mod await_one;
mod config;
mod run;

pub use config::DriverConfig;
pub use run::{Driver, RunSummary, run};
