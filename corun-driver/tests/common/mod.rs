//! Common test utilities for integration tests.

#![allow(dead_code)]

use corun_core::awaitable::Yielded;
use corun_core::failure::{Failure, Settlement};
use corun_core::testing::{Delivery, MockProvider};
use corun_core::traits::{Computation, Resume, Step};
use corun_core::value::Value;
use corun_driver::{Driver, DriverConfig};
use serde_json::json;
use std::collections::HashMap;

/// Which awaitable shape a provider hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Deferred,
    Callback,
}

/// Build an awaitable of `shape` from `provider`.
pub fn awaitable(
    provider: &MockProvider,
    shape: Shape,
    settlement: Settlement,
    delivery: Delivery,
) -> Yielded {
    match shape {
        Shape::Deferred => provider.deferred(settlement, delivery).into(),
        Shape::Callback => provider.callback(settlement, delivery).into(),
    }
}

/// A file store that answers reads through either awaitable shape.
#[derive(Clone)]
pub struct FakeFiles {
    provider: MockProvider,
    shape: Shape,
    delivery: Delivery,
    files: HashMap<String, String>,
}

impl FakeFiles {
    pub fn new(shape: Shape, delivery: Delivery) -> Self {
        Self {
            provider: MockProvider::new(),
            shape,
            delivery,
            files: HashMap::new(),
        }
    }

    pub fn with_file(mut self, path: &str, contents: &str) -> Self {
        self.files.insert(path.to_string(), contents.to_string());
        self
    }

    pub fn provider(&self) -> &MockProvider {
        &self.provider
    }

    pub fn read(&self, path: &str) -> Yielded {
        let settlement = self
            .files
            .get(path)
            .map(|contents| Value::string(contents.clone()))
            .ok_or_else(|| Failure::new(format!("ENOENT: {}", path)));
        awaitable(&self.provider, self.shape, settlement, self.delivery)
    }
}

/// Reads two files in sequence, written as an explicit state machine.
///
/// With `fallback` set, a failed read is replaced by the fallback text.
/// Completes with `{"first": ..., "second": ...}`.
pub struct ReadTwo {
    files: FakeFiles,
    fallback: Option<String>,
    state: ReadTwoState,
}

enum ReadTwoState {
    Start,
    AwaitFirst,
    AwaitSecond { first: Value },
    Done,
}

impl ReadTwo {
    pub fn new(files: FakeFiles) -> Self {
        Self {
            files,
            fallback: None,
            state: ReadTwoState::Start,
        }
    }

    pub fn with_fallback(mut self, text: &str) -> Self {
        self.fallback = Some(text.to_string());
        self
    }

    fn value_or_fallback(&self, input: Resume) -> Result<Value, Failure> {
        match input {
            Resume::Value(v) => Ok(v),
            Resume::Failure(f) => match &self.fallback {
                Some(text) => Ok(Value::string(text.clone())),
                None => Err(f),
            },
            Resume::Start => Err(Failure::new("resumed without a value")),
        }
    }
}

impl Computation for ReadTwo {
    fn resume(&mut self, input: Resume) -> Step {
        match std::mem::replace(&mut self.state, ReadTwoState::Done) {
            ReadTwoState::Start => {
                self.state = ReadTwoState::AwaitFirst;
                Step::Yield(self.files.read("input.txt"))
            }
            ReadTwoState::AwaitFirst => match self.value_or_fallback(input) {
                Ok(first) => {
                    self.state = ReadTwoState::AwaitSecond { first };
                    Step::Yield(self.files.read("output.txt"))
                }
                Err(f) => Step::Fail(f),
            },
            ReadTwoState::AwaitSecond { first } => match self.value_or_fallback(input) {
                Ok(second) => Step::Complete(Some(Value::from(json!({
                    "first": first.into_json(),
                    "second": second.into_json(),
                })))),
                Err(f) => Step::Fail(f),
            },
            ReadTwoState::Done => Step::Fail(Failure::new("resumed after completion")),
        }
    }
}

/// A driver with a test label and payload logging on.
pub fn test_driver() -> Driver {
    Driver::new(
        DriverConfig::default()
            .with_label("test")
            .with_log_values(true),
    )
}

/// Values of a JSON array result, as strings.
pub fn strings(value: &Value) -> Vec<String> {
    value
        .items()
        .map(|items| {
            items
                .iter()
                .map(|item| item.as_str().unwrap_or_default().to_string())
                .collect()
        })
        .unwrap_or_default()
}
