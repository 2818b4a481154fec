//! Log output settings.

use std::env;
use std::fmt;
use std::io::IsTerminal;
use std::str::FromStr;
use thiserror::Error;

/// Filter used when neither `CORUN_LOG_LEVEL` nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "info";

/// How log lines are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per event, span fields flattened in.
    Json,
    /// Multi-line, colored.
    Pretty,
    /// One line per event.
    #[default]
    Compact,
}

/// A `CORUN_LOG_FORMAT` value that names no known format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log format `{0}` (expected json, pretty or compact)")]
pub struct UnknownLogFormat(pub String);

impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            _ => Err(UnknownLogFormat(s.to_string())),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
            Self::Compact => "compact",
        })
    }
}

/// Settings for [`init_tracing`](super::init_tracing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Output format.
    pub format: LogFormat,
    /// `EnvFilter` directives, e.g. `"info,corun_driver=trace"`.
    pub filter: String,
    /// Print file and line of each event.
    pub location: bool,
    /// Print the thread name and ID of each event. Useful when providers
    /// settle from their own threads.
    pub threads: bool,
    /// Emit an event when each `coroutine_run` span closes, with its timing.
    pub run_spans: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: DEFAULT_FILTER.to_string(),
            location: false,
            threads: false,
            run_spans: false,
        }
    }
}

impl TracingConfig {
    /// Read settings from the environment.
    ///
    /// - `CORUN_LOG_FORMAT`: `json`, `pretty` or `compact`. When unset or
    ///   unknown, pretty on a terminal and json otherwise.
    /// - `CORUN_LOG_LEVEL`, then `RUST_LOG`: filter directives
    /// - `CORUN_LOG_LOCATION`: include file and line
    /// - `CORUN_LOG_THREADS`: include thread name and ID
    /// - `CORUN_LOG_SPANS`: log run span closes
    pub fn from_env() -> Self {
        let format = env::var("CORUN_LOG_FORMAT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| {
                if std::io::stdout().is_terminal() {
                    LogFormat::Pretty
                } else {
                    LogFormat::Json
                }
            });

        let filter = env::var("CORUN_LOG_LEVEL")
            .or_else(|_| env::var("RUST_LOG"))
            .unwrap_or_else(|_| DEFAULT_FILTER.to_string());

        Self {
            format,
            filter,
            location: flag("CORUN_LOG_LOCATION"),
            threads: flag("CORUN_LOG_THREADS"),
            run_spans: flag("CORUN_LOG_SPANS"),
        }
    }

    /// Set the output format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the filter directives.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Toggle file and line output.
    pub fn with_location(mut self, enabled: bool) -> Self {
        self.location = enabled;
        self
    }

    /// Toggle thread output.
    pub fn with_threads(mut self, enabled: bool) -> Self {
        self.threads = enabled;
        self
    }

    /// Toggle run span close events.
    pub fn with_run_spans(mut self, enabled: bool) -> Self {
        self.run_spans = enabled;
        self
    }
}

fn flag(key: &str) -> bool {
    env::var(key).is_ok_and(|s| s == "1" || s.eq_ignore_ascii_case("true"))
}
