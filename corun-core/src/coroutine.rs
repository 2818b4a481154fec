//! Exclusive owner of a computation.
//!
//! A [`Coroutine`] tracks where its computation is in the
//! Created → RunningStep → Awaiting → ... → Completed/Failed lifecycle and
//! refuses any resumption that does not match the step currently in flight.
//! Each yield hands out a [`StepTicket`]; resuming consumes it, so a step can
//! be resumed at most once.

use crate::awaitable::Yielded;
use crate::error::{CorunError, Result};
use crate::failure::{Failure, Settlement};
use crate::traits::{Computation, Resume, Step};
use crate::types::StepIndex;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a coroutine.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoroutineState {
    /// Constructed, not yet advanced.
    Created = 0,
    /// Inside a call to the computation.
    RunningStep = 1,
    /// Suspended on an awaitable; one resumption is pending.
    Awaiting = 2,
    /// Finished successfully.
    Completed = 3,
    /// Finished with an escaped failure.
    Failed = 4,
}

impl CoroutineState {
    /// Check if the state is terminal (completed or failed).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Check if a resumption is outstanding.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Awaiting)
    }
}

impl fmt::Display for CoroutineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Created => "created",
            Self::RunningStep => "running_step",
            Self::Awaiting => "awaiting",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Permission to resume one specific step.
///
/// Not `Clone`: [`Coroutine::resume`] takes it by value.
#[derive(Debug, PartialEq, Eq)]
pub struct StepTicket {
    step: StepIndex,
}

impl StepTicket {
    /// The step this ticket resumes.
    pub fn step(&self) -> StepIndex {
        self.step
    }
}

/// Outcome of advancing a coroutine.
#[derive(Debug)]
pub enum Advanced {
    /// Suspended; resume with `ticket` once `yielded` has settled.
    Yielded {
        /// Ticket for the pending resumption.
        ticket: StepTicket,
        /// What the computation is waiting on.
        yielded: Yielded,
    },
    /// Finished with an optional value.
    Completed(Option<Value>),
    /// Finished with an escaped failure.
    Failed(Failure),
}

/// A computation plus the bookkeeping that keeps its resumptions in order.
pub struct Coroutine<C> {
    computation: C,
    state: CoroutineState,
    step: StepIndex,
    steps_taken: u64,
}

impl<C: Computation> Coroutine<C> {
    /// Take ownership of a fresh computation.
    pub fn new(computation: C) -> Self {
        Self {
            computation,
            state: CoroutineState::Created,
            step: StepIndex::FIRST,
            steps_taken: 0,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> CoroutineState {
        self.state
    }

    /// Index of the most recent step.
    pub fn step(&self) -> StepIndex {
        self.step
    }

    /// Number of times the computation has been advanced.
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Advance for the first time, with no input.
    pub fn start(&mut self) -> Result<Advanced> {
        if self.state != CoroutineState::Created {
            return Err(CorunError::InvalidTransition {
                state: self.state,
                action: "start",
            });
        }
        Ok(self.advance(Resume::Start))
    }

    /// Resume the step named by `ticket` with the settlement of its awaitable.
    ///
    /// A failure is raised inside the computation at its suspension point.
    pub fn resume(&mut self, ticket: StepTicket, settlement: Settlement) -> Result<Advanced> {
        if self.state != CoroutineState::Awaiting {
            return Err(CorunError::InvalidTransition {
                state: self.state,
                action: "resume",
            });
        }
        if ticket.step != self.step {
            return Err(CorunError::StaleTicket {
                expected: self.step,
                actual: ticket.step,
            });
        }

        self.step = self.step.next();
        Ok(self.advance(Resume::from(settlement)))
    }

    fn advance(&mut self, input: Resume) -> Advanced {
        self.state = CoroutineState::RunningStep;
        self.steps_taken += 1;

        match self.computation.resume(input) {
            Step::Yield(yielded) => {
                self.state = CoroutineState::Awaiting;
                Advanced::Yielded {
                    ticket: StepTicket { step: self.step },
                    yielded,
                }
            }
            Step::Complete(value) => {
                self.state = CoroutineState::Completed;
                Advanced::Completed(value)
            }
            Step::Fail(failure) => {
                self.state = CoroutineState::Failed;
                Advanced::Failed(failure)
            }
        }
    }
}

impl<C> fmt::Debug for Coroutine<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coroutine")
            .field("state", &self.state)
            .field("step", &self.step)
            .field("steps_taken", &self.steps_taken)
            .finish_non_exhaustive()
    }
}
