//! Error types for corun.
//!
//! Every error carries the identifiers (run ID, step index) needed to tell
//! which run and which suspension point it came from.
//!
//! A provider reporting a failure is *not* an error here. That failure is
//! injected into the computation and only surfaces as
//! [`CorunError::UnrecoveredFailure`] once the computation lets it escape.

use crate::coroutine::CoroutineState;
use crate::failure::Failure;
use crate::types::{RunId, StepIndex};
use thiserror::Error;

/// The main error type for corun operations.
#[derive(Error, Debug)]
pub enum CorunError {
    // =========================================================================
    // Run Errors (E001-E009)
    // =========================================================================
    /// A computation yielded something that is neither supported shape.
    #[error("E001: Shape violation in {run_id} at {step}: yielded a {found} value")]
    ShapeViolation {
        /// The run in which the malformed yield happened.
        run_id: RunId,
        /// The step that produced it.
        step: StepIndex,
        /// Kind of the value that was yielded.
        found: String,
    },

    /// A failure escaped the computation.
    #[error("E002: Computation {run_id} failed at {step}: {failure}")]
    UnrecoveredFailure {
        /// The run that failed.
        run_id: RunId,
        /// The step at which the failure propagated out.
        step: StepIndex,
        /// The failure itself.
        failure: Failure,
    },

    /// The continuation for a step was dropped without ever firing.
    #[error("E003: Awaitable for {step} in {run_id} was dropped without settling")]
    AwaitableAbandoned {
        /// The run that was waiting.
        run_id: RunId,
        /// The step whose awaitable was abandoned.
        step: StepIndex,
    },

    /// The computation yielded more often than the configured limit allows.
    #[error("E004: {run_id} exceeded the step limit of {limit}")]
    StepLimitExceeded {
        /// The run that was stopped.
        run_id: RunId,
        /// The configured limit.
        limit: u64,
    },

    // =========================================================================
    // Coroutine Contract Errors (E010-E019)
    // =========================================================================
    /// An operation was attempted from a state that does not allow it.
    #[error("E010: Cannot {action} a coroutine in state {state}")]
    InvalidTransition {
        /// Current state of the coroutine.
        state: CoroutineState,
        /// The rejected action.
        action: &'static str,
    },

    /// A resumption arrived for a step other than the one in flight.
    #[error("E011: Stale resumption: coroutine awaits {expected}, got {actual}")]
    StaleTicket {
        /// The step currently awaiting.
        expected: StepIndex,
        /// The step named by the ticket.
        actual: StepIndex,
    },
}

impl CorunError {
    /// Get the error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ShapeViolation { .. } => "E001",
            Self::UnrecoveredFailure { .. } => "E002",
            Self::AwaitableAbandoned { .. } => "E003",
            Self::StepLimitExceeded { .. } => "E004",
            Self::InvalidTransition { .. } => "E010",
            Self::StaleTicket { .. } => "E011",
        }
    }

    /// The failure that escaped the computation, if this is one.
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::UnrecoveredFailure { failure, .. } => Some(failure),
            _ => None,
        }
    }

    /// Check if the computation itself failed, as opposed to the driver
    /// refusing to continue.
    pub fn is_computation_failure(&self) -> bool {
        matches!(self, Self::UnrecoveredFailure { .. })
    }

    /// Check if this error reports misuse of the provider or coroutine
    /// contract.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::ShapeViolation { .. }
                | Self::AwaitableAbandoned { .. }
                | Self::InvalidTransition { .. }
                | Self::StaleTicket { .. }
        )
    }
}

/// Result type alias for corun operations.
pub type Result<T> = std::result::Result<T, CorunError>;
