//! Callback-accepting operations and their `(failure, value)` continuations.

use crate::failure::{Failure, Settlement};
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

type ContinuationFn = dyn Fn(Option<Failure>, Option<Value>) + Send + Sync;

/// Completion callback handed to a [`CallbackOp`].
///
/// The provider calls it exactly once with either a failure or a success
/// value. It is `Clone`, so nothing stops a provider from calling it twice;
/// whoever builds the continuation decides what a second call means.
#[derive(Clone)]
pub struct Continuation {
    inner: Arc<ContinuationFn>,
}

impl Continuation {
    /// Wrap a `(failure, value)` callback.
    pub fn new(f: impl Fn(Option<Failure>, Option<Value>) + Send + Sync + 'static) -> Self {
        Self { inner: Arc::new(f) }
    }

    /// Report completion.
    ///
    /// A present failure wins over a value.
    pub fn call(&self, failure: Option<Failure>, value: Option<Value>) {
        (self.inner)(failure, value)
    }

    /// Report success.
    pub fn succeed(&self, value: impl Into<Value>) {
        self.call(None, Some(value.into()))
    }

    /// Report failure.
    pub fn fail(&self, failure: impl Into<Failure>) {
        self.call(Some(failure.into()), None)
    }

    /// Report a settlement.
    pub fn settle(&self, settlement: Settlement) {
        match settlement {
            Ok(value) => self.succeed(value),
            Err(failure) => self.fail(failure),
        }
    }

    /// Collapse a `(failure, value)` report into a settlement.
    ///
    /// A success without a value settles with null.
    pub fn to_settlement(failure: Option<Failure>, value: Option<Value>) -> Settlement {
        match failure {
            Some(failure) => Err(failure),
            None => Ok(value.unwrap_or_default()),
        }
    }
}

impl fmt::Debug for Continuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Continuation").finish_non_exhaustive()
    }
}

/// An operation that reports its result through a [`Continuation`].
///
/// The continuation may be called synchronously inside [`invoke`](Self::invoke)
/// or later from any thread.
pub struct CallbackOp {
    op: Box<dyn FnOnce(Continuation) + Send>,
}

impl CallbackOp {
    /// Wrap an operation.
    pub fn new(op: impl FnOnce(Continuation) + Send + 'static) -> Self {
        Self { op: Box::new(op) }
    }

    /// Start the operation.
    pub fn invoke(self, continuation: Continuation) {
        (self.op)(continuation)
    }
}

impl fmt::Debug for CallbackOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackOp").finish_non_exhaustive()
    }
}

/// Turn a node-style function `f(args, continuation)` into a factory of
/// callback-accepting operations.
///
/// ```ignore
/// let read = thunk(|path: String, k: Continuation| {
///     std::thread::spawn(move || match std::fs::read_to_string(&path) {
///         Ok(text) => k.succeed(text),
///         Err(e) => k.fail(e.to_string()),
///     });
/// });
/// let op: CallbackOp = read("input.txt".to_string());
/// ```
pub fn thunk<A, F>(f: F) -> impl Fn(A) -> CallbackOp + Send + Sync + Clone
where
    A: Send + 'static,
    F: Fn(A, Continuation) + Send + Sync + 'static,
{
    let f = Arc::new(f);
    move |args: A| {
        let f = Arc::clone(&f);
        CallbackOp::new(move |k| f(args, k))
    }
}
