//! Core traits for corun components.
//!
//! - `Computation`: a resumable state machine driven one step at a time

pub mod computation;

pub use computation::{Computation, Resume, Step};
