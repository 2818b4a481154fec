//! The suspendable computation trait and its step protocol.

use crate::awaitable::Yielded;
use crate::failure::{Failure, Settlement};
use crate::value::Value;

/// Input for one step of a computation.
#[derive(Debug, Clone, PartialEq)]
pub enum Resume {
    /// First advance, no input.
    Start,
    /// The awaited operation succeeded with this value.
    Value(Value),
    /// The awaited operation failed. The computation should treat this as
    /// raised at its current suspension point.
    Failure(Failure),
}

impl From<Settlement> for Resume {
    fn from(settlement: Settlement) -> Self {
        match settlement {
            Ok(value) => Self::Value(value),
            Err(failure) => Self::Failure(failure),
        }
    }
}

/// Result of advancing a computation by one step.
#[derive(Debug)]
pub enum Step {
    /// Suspended on this awaitable.
    Yield(Yielded),
    /// Finished, with an optional final value.
    Complete(Option<Value>),
    /// Finished by letting a failure escape.
    Fail(Failure),
}

impl Step {
    /// Whether the computation is finished (successfully or not).
    pub fn is_complete(&self) -> bool {
        !matches!(self, Self::Yield(_))
    }
}

/// A resumable state machine.
///
/// Implementations hold their own program counter and locals. Each call to
/// [`resume`](Self::resume) runs until the next suspension point or the end.
///
/// # Example
///
/// ```ignore
/// enum ReadTwo { Start, First, Second(Value), Done }
///
/// impl Computation for ReadTwo {
///     fn resume(&mut self, input: Resume) -> Step {
///         let input = match input {
///             Resume::Failure(f) => return Step::Fail(f),
///             other => other,
///         };
///         match (std::mem::replace(self, ReadTwo::Done), input) {
///             (ReadTwo::Start, Resume::Start) => {
///                 *self = ReadTwo::First;
///                 Step::Yield(read_file("input.txt").into())
///             }
///             (ReadTwo::First, Resume::Value(f1)) => {
///                 *self = ReadTwo::Second(f1);
///                 Step::Yield(read_file("output.txt").into())
///             }
///             (ReadTwo::Second(f1), Resume::Value(f2)) => {
///                 println!("{f1}\n{f2}");
///                 Step::Complete(None)
///             }
///             _ => Step::Fail(Failure::new("resumed out of order")),
///         }
///     }
/// }
/// ```
pub trait Computation {
    /// Advance to the next suspension point or to completion.
    fn resume(&mut self, input: Resume) -> Step;
}

impl<C: Computation + ?Sized> Computation for Box<C> {
    fn resume(&mut self, input: Resume) -> Step {
        (**self).resume(input)
    }
}

/// A computation backed by a closure.
pub struct FromFn<F>(F);

impl<F> Computation for FromFn<F>
where
    F: FnMut(Resume) -> Step,
{
    fn resume(&mut self, input: Resume) -> Step {
        (self.0)(input)
    }
}

/// Build a computation from an `FnMut(Resume) -> Step`.
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: FnMut(Resume) -> Step,
{
    FromFn(f)
}
