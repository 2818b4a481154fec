//! Driver configuration.

/// Configuration for a [`Driver`](super::Driver).
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Label attached to every run span, to tell drivers apart in logs.
    pub label: String,
    /// Maximum number of suspension steps per run.
    ///
    /// `None` means unlimited. A run that yields past the limit fails with
    /// `StepLimitExceeded` before the extra step is awaited.
    pub max_steps: Option<u64>,
    /// Include resumption payloads in `trace`-level events.
    pub log_values: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            label: "corun".to_string(),
            max_steps: None,
            log_values: false,
        }
    }
}

impl DriverConfig {
    /// Create configuration from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `CORUN_LABEL`: Label for run spans
    /// - `CORUN_MAX_STEPS`: Step limit per run (unset or `0` for unlimited)
    /// - `CORUN_LOG_VALUES`: Log resumption payloads at trace level
    ///
    /// Unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let label = std::env::var("CORUN_LABEL").unwrap_or(defaults.label);

        let max_steps = std::env::var("CORUN_MAX_STEPS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|&n| n > 0);

        let log_values = std::env::var("CORUN_LOG_VALUES")
            .map(|s| s.eq_ignore_ascii_case("true") || s == "1")
            .unwrap_or(defaults.log_values);

        Self {
            label,
            max_steps,
            log_values,
        }
    }

    /// Set the run label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the step limit. `0` means unlimited, as with `CORUN_MAX_STEPS`.
    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps).filter(|&n| n > 0);
        self
    }

    /// Enable payload logging.
    pub fn with_log_values(mut self, enabled: bool) -> Self {
        self.log_values = enabled;
        self
    }
}
