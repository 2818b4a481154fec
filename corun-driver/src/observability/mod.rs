//! Log output setup for programs embedding the driver.
//!
//! The driver emits `tracing` events and spans:
//! - a `coroutine_run` span per run, carrying `run_id` and `label`
//! - `debug` events when a run starts and ends
//! - `trace` events for every awaited step
//! - a `warn` event whenever a duplicate settlement is discarded
//!
//! # Configuration
//!
//! [`TracingConfig::from_env`] reads `CORUN_LOG_FORMAT` (`json`, `pretty`
//! or `compact`), the filter from `CORUN_LOG_LEVEL` or `RUST_LOG`, and the
//! `CORUN_LOG_LOCATION`, `CORUN_LOG_THREADS` and `CORUN_LOG_SPANS` flags.
//!
//! # Example
//!
//! ```ignore
//! use corun_driver::observability::{LogFormat, TracingConfig, init_tracing};
//!
//! let config = TracingConfig::default()
//!     .with_format(LogFormat::Json)
//!     .with_filter("info,corun_driver=trace")
//!     .with_run_spans(true);
//! let _guard = init_tracing(config)?;
//! ```

mod config;
mod tracing_setup;

pub use config::{DEFAULT_FILTER, LogFormat, TracingConfig, UnknownLogFormat};
pub use tracing_setup::{TracingGuard, init_tracing};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_quiet() {
        let config = TracingConfig::default();
        assert_eq!(config.format, LogFormat::Compact);
        assert_eq!(config.filter, DEFAULT_FILTER);
        assert!(!config.location);
        assert!(!config.threads);
        assert!(!config.run_spans);
    }

    #[test]
    fn with_methods_chain() {
        let config = TracingConfig::default()
            .with_format(LogFormat::Json)
            .with_filter("corun_driver=trace")
            .with_threads(true);

        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.filter, "corun_driver=trace");
        assert!(config.threads);
        assert!(!config.location);
    }

    #[test]
    fn log_format_parse() {
        assert_eq!(" JSON ".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("pretty".parse::<LogFormat>(), Ok(LogFormat::Pretty));

        let err = "xml".parse::<LogFormat>().unwrap_err();
        assert_eq!(err, UnknownLogFormat("xml".to_string()));
        assert!(err.to_string().contains("xml"));
    }

    #[test]
    fn log_format_display_parses_back() {
        for format in [LogFormat::Json, LogFormat::Pretty, LogFormat::Compact] {
            assert_eq!(format.to_string().parse::<LogFormat>(), Ok(format));
        }
    }

    #[test]
    fn from_env_has_a_filter() {
        assert!(!TracingConfig::from_env().filter.is_empty());
    }

    #[test]
    fn bad_filter_is_rejected() {
        let config = TracingConfig::default().with_filter("corun_driver=notalevel");
        assert!(init_tracing(config).is_err());
    }
}
