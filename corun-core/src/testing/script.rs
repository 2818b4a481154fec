//! A computation that yields a scripted sequence of awaitables.

use super::recording::{RecordedEvent, ResumptionRecorder};
use crate::awaitable::Yielded;
use crate::traits::{Computation, Resume, Step};
use crate::types::StepIndex;
use crate::value::Value;
use std::collections::VecDeque;
use std::sync::Arc;

type Producer = Box<dyn FnOnce() -> Yielded + Send>;

/// What a scripted computation does when a failure is raised inside it.
#[derive(Debug, Clone, PartialEq)]
pub enum Recovery {
    /// No handler: let the failure escape.
    Propagate,
    /// Catch it and carry on as if the step had produced this value.
    Substitute(Value),
}

/// Yields each scripted awaitable in turn, collecting every value it is
/// resumed with.
///
/// Awaitables are produced lazily, at the step that yields them. Recorded
/// step indices match the driver's: the first yield is step 0. On
/// completion the computation returns the collected values as an array.
pub struct ScriptedComputation {
    script: VecDeque<Producer>,
    recovery: Recovery,
    received: Vec<Value>,
    recorder: Option<Arc<ResumptionRecorder>>,
    pending: StepIndex,
    next_step: StepIndex,
}

impl ScriptedComputation {
    /// An empty script: completes on its first advance.
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            recovery: Recovery::Propagate,
            received: Vec::new(),
            recorder: None,
            pending: StepIndex::FIRST,
            next_step: StepIndex::FIRST,
        }
    }

    /// Yield whatever `producer` builds at the next step.
    pub fn then(mut self, producer: impl FnOnce() -> Yielded + Send + 'static) -> Self {
        self.script.push_back(Box::new(producer));
        self
    }

    /// Yield an already-built value at the next step.
    pub fn then_yield(self, yielded: impl Into<Yielded>) -> Self {
        let yielded = yielded.into();
        self.then(move || yielded)
    }

    /// Set the failure handling policy.
    pub fn with_recovery(mut self, recovery: Recovery) -> Self {
        self.recovery = recovery;
        self
    }

    /// Record every resumption into `recorder`.
    pub fn with_recorder(mut self, recorder: Arc<ResumptionRecorder>) -> Self {
        self.recorder = Some(recorder);
        self
    }

    /// Values received so far.
    pub fn received(&self) -> &[Value] {
        &self.received
    }

    fn record(&self, event: RecordedEvent) {
        if let Some(recorder) = &self.recorder {
            recorder.record(event);
        }
    }
}

impl Default for ScriptedComputation {
    fn default() -> Self {
        Self::new()
    }
}

impl Computation for ScriptedComputation {
    fn resume(&mut self, input: Resume) -> Step {
        match input {
            Resume::Start => self.record(RecordedEvent::Started),
            Resume::Value(value) => {
                self.record(RecordedEvent::Resumed {
                    step: self.pending,
                    value: value.clone(),
                });
                self.received.push(value);
            }
            Resume::Failure(failure) => {
                self.record(RecordedEvent::FailureInjected {
                    step: self.pending,
                    message: failure.message.clone(),
                });
                match &self.recovery {
                    Recovery::Propagate => {
                        self.record(RecordedEvent::Failed {
                            message: failure.message.clone(),
                        });
                        return Step::Fail(failure);
                    }
                    Recovery::Substitute(substitute) => {
                        let substitute = substitute.clone();
                        self.record(RecordedEvent::Recovered {
                            step: self.pending,
                            substitute: substitute.clone(),
                        });
                        self.received.push(substitute);
                    }
                }
            }
        }

        match self.script.pop_front() {
            Some(producer) => {
                self.pending = self.next_step;
                self.next_step = self.next_step.next();
                Step::Yield(producer())
            }
            None => {
                self.record(RecordedEvent::Completed);
                Step::Complete(Some(Value::list(self.received.iter().cloned())))
            }
        }
    }
}
