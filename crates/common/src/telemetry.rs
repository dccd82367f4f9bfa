//! Structured logging setup.
//!
//! Installs a `tracing` subscriber with an environment filter and either a
//! pretty or a JSON formatting layer.

use anyhow::{Context, Result};
use tracing::Subscriber;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::config::TelemetryConfig;

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured log level. Fails if a
/// global subscriber is already installed.
///
/// # Examples
///
/// ```no_run
/// use leaderboard_common::{config::TelemetryConfig, telemetry::init_tracing};
///
/// init_tracing(&TelemetryConfig::default()).expect("Failed to initialize tracing");
/// ```
pub fn init_tracing(config: &TelemetryConfig) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = Registry::default().with(env_filter);

    if config.json_logging {
        registry
            .with(json_layer())
            .try_init()
            .context("Failed to initialize tracing subscriber")?;
    } else {
        registry
            .with(pretty_layer())
            .try_init()
            .context("Failed to initialize tracing subscriber")?;
    }

    tracing::debug!(service = %config.service_name, "tracing initialized");

    Ok(())
}

/// Initialize a compact stderr subscriber for command-line tools.
pub fn init_cli_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    Registry::default()
        .with(env_filter)
        .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    Ok(())
}

/// Create a JSON logging layer
fn json_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_target(true)
        .with_level(true)
}

/// Create a pretty-formatted logging layer
fn pretty_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .pretty()
        .with_target(true)
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
}
