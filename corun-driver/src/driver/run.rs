//! The suspend/resume loop.
//!
//! The driver owns one [`Coroutine`] per run and advances it step by step:
//!
//! 1. Advance with no input.
//! 2. If the step completed (or a failure escaped), stop.
//! 3. Classify the yielded value. A plain value is a shape violation and
//!    ends the run without resuming.
//! 4. Await the awaitable through [`await_one`], then resume the step with
//!    the settlement: a value continues the computation, a failure is raised
//!    inside it at the suspension point.
//! 5. Repeat from 2.
//!
//! The loop is iterative. A long chain of awaitables that settle
//! synchronously does not grow the stack.

use super::await_one::await_one;
use super::config::DriverConfig;
use corun_core::awaitable::Awaitable;
use corun_core::coroutine::{Advanced, Coroutine};
use corun_core::error::{CorunError, Result};
use corun_core::traits::Computation;
use corun_core::types::RunId;
use corun_core::value::Value;
use tracing::{debug, instrument, trace};

/// What a finished run reports.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Identifier of the run.
    pub run_id: RunId,
    /// Number of suspension steps that were awaited and resumed.
    pub steps: u64,
    /// The computation's final value, if it produced one.
    pub value: Option<Value>,
}

/// Drives suspendable computations to completion.
///
/// A driver can be reused for any number of runs; each run gets its own
/// [`RunId`] and its own freshly constructed computation.
#[derive(Debug, Clone, Default)]
pub struct Driver {
    config: DriverConfig,
}

impl Driver {
    /// Create a driver with the given configuration.
    pub fn new(config: DriverConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Construct a computation with `factory` and drive it to the end.
    ///
    /// Resolves with the computation's final value. Fails with
    /// [`CorunError::UnrecoveredFailure`] if a failure escapes the
    /// computation, or [`CorunError::ShapeViolation`] if it yields something
    /// that cannot be awaited.
    pub async fn run<F, C>(&self, factory: F) -> Result<Option<Value>>
    where
        F: FnOnce() -> C,
        C: Computation,
    {
        self.run_with_summary(factory)
            .await
            .map(|summary| summary.value)
    }

    /// Like [`run`](Self::run), returning the run's identifier and step count
    /// as well.
    pub async fn run_with_summary<F, C>(&self, factory: F) -> Result<RunSummary>
    where
        F: FnOnce() -> C,
        C: Computation,
    {
        self.drive(RunId::new(), Coroutine::new(factory())).await
    }

    #[instrument(
        name = "coroutine_run",
        level = "debug",
        skip_all,
        fields(run_id = %run_id, label = %self.config.label)
    )]
    async fn drive<C: Computation>(
        &self,
        run_id: RunId,
        mut coroutine: Coroutine<C>,
    ) -> Result<RunSummary> {
        debug!("Starting computation");
        let mut advanced = coroutine.start()?;
        let mut steps = 0u64;

        loop {
            match advanced {
                Advanced::Completed(value) => {
                    debug!(steps, "Computation completed");
                    return Ok(RunSummary {
                        run_id,
                        steps,
                        value,
                    });
                }
                Advanced::Failed(failure) => {
                    debug!(steps, "Failure escaped computation");
                    return Err(CorunError::UnrecoveredFailure {
                        run_id,
                        step: coroutine.step(),
                        failure,
                    });
                }
                Advanced::Yielded { ticket, yielded } => {
                    let step = ticket.step();

                    if let Some(limit) = self.config.max_steps.filter(|&limit| steps >= limit) {
                        return Err(CorunError::StepLimitExceeded { run_id, limit });
                    }

                    let awaitable =
                        Awaitable::try_from(yielded).map_err(|found| CorunError::ShapeViolation {
                            run_id,
                            step,
                            found: found.kind().to_string(),
                        })?;

                    trace!(step = %step, shape = awaitable.shape(), "Awaiting");
                    let settlement = await_one(awaitable, run_id, step).await?;

                    if self.config.log_values {
                        match &settlement {
                            Ok(value) => trace!(step = %step, value = %value, "Resuming"),
                            Err(failure) => {
                                trace!(step = %step, failure = %failure, "Raising failure")
                            }
                        }
                    } else {
                        trace!(step = %step, ok = settlement.is_ok(), "Resuming");
                    }

                    steps += 1;
                    advanced = coroutine.resume(ticket, settlement)?;
                }
            }
        }
    }
}

/// Drive a freshly constructed computation with the default driver.
///
/// ```ignore
/// let value = corun_driver::run(|| ReadTwo::Start).await?;
/// ```
pub async fn run<F, C>(factory: F) -> Result<Option<Value>>
where
    F: FnOnce() -> C,
    C: Computation,
{
    Driver::default().run(factory).await
}
