//! The two awaitable shapes a computation may yield.
//!
//! - [`Deferred`]: settles exactly once; observers register with
//!   [`Deferred::on_settle`]. Settled through its paired [`Resolver`].
//! - [`CallbackOp`]: a function that, given a [`Continuation`], reports a
//!   failure or a value through it.
//!
//! [`Yielded`] is what a computation hands back at a suspension point, and
//! may also be a plain [`Value`](crate::Value) that is neither shape.
//! [`Awaitable`] is the classified form a driver can actually wait on.

mod callback;
mod deferred;
mod yielded;

pub use callback::{CallbackOp, Continuation, thunk};
pub use deferred::{Deferred, Resolver};
pub use yielded::{Awaitable, Yielded};
