//! Convenient re-exports for writing computations and providers.

pub use crate::awaitable::{Awaitable, CallbackOp, Continuation, Deferred, Resolver, Yielded, thunk};
pub use crate::coroutine::{Advanced, Coroutine, CoroutineState, StepTicket};
pub use crate::error::{CorunError, Result};
pub use crate::failure::{Failure, Settlement};
pub use crate::traits::computation;
pub use crate::traits::{Computation, Resume, Step};
pub use crate::types::{RunId, StepIndex};
pub use crate::value::Value;
