//! Global subscriber installation.

use anyhow::{Context, Result};
use tracing::Subscriber;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use super::config::{LogFormat, TracingConfig};

/// Proof that the global subscriber is installed.
///
/// Hold it for the lifetime of the program.
#[must_use = "hold the guard for as long as logging is needed"]
#[derive(Debug)]
pub struct TracingGuard {
    _private: (),
}

/// Install a global subscriber rendering the driver's spans and events.
///
/// Fails if the filter directives do not parse or if a global subscriber is
/// already installed.
///
/// ```ignore
/// let _guard = init_tracing(TracingConfig::from_env())?;
/// let value = corun_driver::run(|| computation).await?;
/// ```
pub fn init_tracing(config: TracingConfig) -> Result<TracingGuard> {
    let filter = EnvFilter::try_new(&config.filter)
        .with_context(|| format!("Invalid log filter `{}`", config.filter))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer(&config))
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(TracingGuard { _private: () })
}

fn fmt_layer<S>(config: &TracingConfig) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
{
    let spans = if config.run_spans {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let layer = fmt::layer()
        .with_file(config.location)
        .with_line_number(config.location)
        .with_thread_names(config.threads)
        .with_thread_ids(config.threads)
        .with_span_events(spans);

    match config.format {
        LogFormat::Json => layer.json().flatten_event(true).boxed(),
        LogFormat::Pretty => layer.pretty().boxed(),
        LogFormat::Compact => layer.compact().boxed(),
    }
}
