//! Failure reasons reported by providers and computations.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The outcome of one awaitable transition.
pub type Settlement = std::result::Result<Value, Failure>;

/// Why an awaitable or a computation failed.
///
/// A failure reported by a provider is not a driver error: it is injected
/// into the computation at its suspension point, and only becomes a
/// [`CorunError::UnrecoveredFailure`](crate::CorunError::UnrecoveredFailure)
/// if the computation lets it propagate.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{message}")]
pub struct Failure {
    /// Human-readable reason.
    pub message: String,
    /// Optional structured detail supplied by the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl Failure {
    /// Create a failure with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
        }
    }

    /// Attach structured detail.
    pub fn with_details(mut self, details: impl Into<Value>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// The failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&str> for Failure {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for Failure {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_message() {
        let failure = Failure::new("disk-error").with_details(Value::int(5));
        assert_eq!(failure.to_string(), "disk-error");
        assert_eq!(failure.details, Some(Value::int(5)));
    }

    #[test]
    fn serde_omits_missing_details() {
        let json = serde_json::to_string(&Failure::from("boom")).unwrap();
        assert_eq!(json, r#"{"message":"boom"}"#);
        let back: Failure = serde_json::from_str(&json).unwrap();
        assert_eq!(back.message(), "boom");
        assert!(back.details.is_none());
    }
}
