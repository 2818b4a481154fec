//! Strongly-typed identifiers for runs and suspension steps.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifies one driver run, from the first advance to the final outcome.
///
/// Serializes as the bare UUID; displays with a `run_` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(Uuid);

impl RunId {
    /// A fresh random ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The UUID behind this ID.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Parse from a UUID string, with or without the `run_` prefix.
    pub fn parse(s: &str) -> Option<Self> {
        let raw = s.strip_prefix("run_").unwrap_or(s);
        Uuid::parse_str(raw).ok().map(Self)
    }
}

impl From<Uuid> for RunId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run_{}", self.0)
    }
}

/// Zero-based index of a suspension step within one run.
///
/// Step 0 is the advance made with no input; step `n` is the `n`-th
/// resumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepIndex(u64);

impl StepIndex {
    /// The first step.
    pub const FIRST: StepIndex = StepIndex(0);

    /// Create a step index from a raw value.
    #[must_use]
    pub const fn new(index: u64) -> Self {
        Self(index)
    }

    /// Get the raw index.
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// The index of the following step.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for StepIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step_{}", self.0)
    }
}
