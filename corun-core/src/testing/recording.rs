//! Recording of what a computation observed at each resumption.

use crate::types::StepIndex;
use crate::value::Value;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// An event observed by a recording computation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecordedEvent {
    /// The computation was advanced for the first time.
    Started,

    /// The computation was resumed with a success value.
    Resumed {
        /// Step being resumed.
        step: StepIndex,
        /// Value delivered.
        value: Value,
    },

    /// A failure was raised at the suspension point.
    FailureInjected {
        /// Step at which it was raised.
        step: StepIndex,
        /// The failure message.
        message: String,
    },

    /// The computation recovered from an injected failure.
    Recovered {
        /// Step at which it recovered.
        step: StepIndex,
        /// The substitute value used instead.
        substitute: Value,
    },

    /// The computation completed.
    Completed,

    /// A failure escaped the computation.
    Failed {
        /// The failure message.
        message: String,
    },
}

impl RecordedEvent {
    /// Get the event type name.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Resumed { .. } => "resumed",
            Self::FailureInjected { .. } => "failure_injected",
            Self::Recovered { .. } => "recovered",
            Self::Completed => "completed",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Thread-safe event log shared between a test and its computation.
#[derive(Debug, Default)]
pub struct ResumptionRecorder {
    events: RwLock<Vec<RecordedEvent>>,
}

impl ResumptionRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn record(&self, event: RecordedEvent) {
        self.events.write().push(event);
    }

    /// Get a copy of all events, in order.
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.read().clone()
    }

    /// Values delivered through successful resumptions, in order.
    pub fn resumed_values(&self) -> Vec<Value> {
        self.events
            .read()
            .iter()
            .filter_map(|e| match e {
                RecordedEvent::Resumed { value, .. } => Some(value.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of times the computation was advanced past its start.
    pub fn resumption_count(&self) -> usize {
        self.events
            .read()
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    RecordedEvent::Resumed { .. } | RecordedEvent::FailureInjected { .. }
                )
            })
            .count()
    }

    /// Events of a given type.
    pub fn events_of_type(&self, event_type: &str) -> Vec<RecordedEvent> {
        self.events
            .read()
            .iter()
            .filter(|e| e.event_type() == event_type)
            .cloned()
            .collect()
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// Export as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&*self.events.read())
    }
}
