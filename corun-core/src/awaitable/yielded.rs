//! What a computation yields, and the subset the driver can await.

use super::callback::CallbackOp;
use super::deferred::Deferred;
use crate::value::Value;

/// The payload of one suspension step.
#[derive(Debug)]
pub enum Yielded {
    /// A deferred result.
    Deferred(Deferred),
    /// A callback-accepting operation.
    Callback(CallbackOp),
    /// A plain value. Neither supported shape; a driver rejects it.
    Value(Value),
}

impl Yielded {
    /// Name of the yielded shape, for diagnostics.
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Deferred(_) => "deferred",
            Self::Callback(_) => "callback",
            Self::Value(_) => "value",
        }
    }
}

impl From<Deferred> for Yielded {
    fn from(deferred: Deferred) -> Self {
        Self::Deferred(deferred)
    }
}

impl From<CallbackOp> for Yielded {
    fn from(op: CallbackOp) -> Self {
        Self::Callback(op)
    }
}

impl From<Value> for Yielded {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// A yielded value of one of the two supported shapes.
#[derive(Debug)]
pub enum Awaitable {
    /// Await by registering a continuation.
    Deferred(Deferred),
    /// Await by invoking with a continuation.
    Callback(CallbackOp),
}

impl Awaitable {
    /// Name of the shape, for diagnostics.
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Deferred(_) => "deferred",
            Self::Callback(_) => "callback",
        }
    }
}

impl TryFrom<Yielded> for Awaitable {
    /// The malformed payload, returned untouched.
    type Error = Value;

    fn try_from(yielded: Yielded) -> Result<Self, Self::Error> {
        match yielded {
            Yielded::Deferred(deferred) => Ok(Self::Deferred(deferred)),
            Yielded::Callback(op) => Ok(Self::Callback(op)),
            Yielded::Value(value) => Err(value),
        }
    }
}
