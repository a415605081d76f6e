//! Log event output for `graft` runs.
//!
//! Events go to stderr so they never mix with the step report printed on
//! stdout. One subscriber is installed per process.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use graft_config::{Config, LogFormat};

static INSTALLED: OnceCell<()> = OnceCell::new();

type EventLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Failures while setting up log output.
#[derive(Debug, thiserror::Error)]
pub(crate) enum TelemetryError {
    /// `log_filter` is not a valid filter directive.
    #[error("log filter `{directive}` is invalid: {message}")]
    Filter {
        /// The rejected directive.
        directive: String,
        /// Parser diagnostic.
        message: String,
    },
    /// Some other subscriber already owns the global default.
    #[error("another tracing subscriber is already installed: {0}")]
    Subscriber(#[source] SetGlobalDefaultError),
}

/// Installs the subscriber described by `config`.
///
/// Only the first successful call has an effect; sessions run repeatedly in
/// one test process keep the first configuration.
pub(crate) fn initialise(config: &Config) -> Result<(), TelemetryError> {
    INSTALLED.get_or_try_init(|| install(config)).map(|_| ())
}

fn install(config: &Config) -> Result<(), TelemetryError> {
    let filter = parse_filter(config.log_filter())?;
    let subscriber = Registry::default().with(event_layer(config.log_format(), filter));
    tracing::subscriber::set_global_default(subscriber).map_err(TelemetryError::Subscriber)
}

fn parse_filter(directive: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(directive).map_err(|error| TelemetryError::Filter {
        directive: directive.to_owned(),
        message: error.to_string(),
    })
}

fn event_layer(format: LogFormat, filter: EnvFilter) -> EventLayer {
    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_timer(fmt::time::UtcTime::rfc_3339());
    match format {
        LogFormat::Json => layer.json().flatten_event(true).with_filter(filter).boxed(),
        LogFormat::Compact => layer.compact().with_filter(filter).boxed(),
    }
}
