//! corun core library
//!
//! This crate provides the data model shared by the corun driver and by the
//! providers and computations plugged into it.
//!
//! # Overview
//!
//! A *computation* is an explicit state machine that can suspend at defined
//! points. Each suspension yields an *awaitable*: either a [`Deferred`] that
//! will settle exactly once, or a [`CallbackOp`] that reports its result
//! through a `(failure, value)` [`Continuation`]. The driver awaits whichever
//! shape was yielded and resumes the computation with the outcome.
//!
//! # Key Components
//!
//! - **Value / Failure**: dynamic payloads and failure reasons
//! - **Awaitable**: the two supported yield shapes and their classification
//! - **Computation**: the resumable state-machine trait
//! - **Coroutine**: exclusive owner of a computation, enforcing one
//!   resumption per step
//!
//! # Example
//!
//! ```ignore
//! use corun_core::prelude::*;
//!
//! let (deferred, resolver) = Deferred::new();
//! let mut coroutine = Coroutine::new(computation::from_fn(move |input| match input {
//!     Resume::Start => Step::Yield(deferred.clone().into()),
//!     Resume::Value(v) => Step::Complete(Some(v)),
//!     Resume::Failure(f) => Step::Fail(f),
//! }));
//!
//! let Advanced::Yielded { ticket, .. } = coroutine.start()? else { unreachable!() };
//! resolver.resolve("done");
//! let advanced = coroutine.resume(ticket, Ok(Value::string("done")))?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod awaitable;
pub mod coroutine;
pub mod error;
pub mod failure;
pub mod prelude;
pub mod testing;
pub mod traits;
pub mod types;
pub mod value;

pub use awaitable::{Awaitable, CallbackOp, Continuation, Deferred, Resolver, Yielded, thunk};
pub use coroutine::{Advanced, Coroutine, CoroutineState, StepTicket};
pub use error::{CorunError, Result};
pub use failure::{Failure, Settlement};
pub use traits::computation;
pub use traits::{Computation, Resume, Step};
pub use types::{RunId, StepIndex};
pub use value::Value;
