//! Logging setup shared by riskscope front-ends.
//!
//! The core only emits `tracing` events; installing a subscriber is left to
//! whichever binary embeds it.

use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::Result;
use crate::error::RiskError;

/// Environment variable that overrides the verbosity flags with a full
/// `tracing` filter directive (e.g. `riskscope_core=trace`).
pub const LOG_ENV_VAR: &str = "RISKSCOPE_LOG";

/// Maps CLI verbosity flags to a maximum log level.
///
/// `quiet` wins over any verbosity: only errors are shown.
pub fn level_for(verbose: u8, quiet: bool) -> Level {
    match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::INFO,
        (false, 1) => Level::DEBUG,
        (false, _) => Level::TRACE,
    }
}

/// Initializes structured logging on stderr.
///
/// # Arguments
/// * `verbose` - Verbosity level (0=INFO, 1=DEBUG, 2+=TRACE)
/// * `quiet` - If true, only show ERROR level logs
/// * `json` - Emit newline-delimited JSON events instead of text
///
/// When [`LOG_ENV_VAR`] is set it takes precedence over `verbose`/`quiet`.
///
/// # Example
/// ```rust,no_run
/// use riskscope_core::logging::init_logging;
///
/// init_logging(1, false, false).expect("Failed to initialize logging");
/// ```
pub fn init_logging(verbose: u8, quiet: bool, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbose, quiet).as_str()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed
        .map_err(|e| RiskError::configuration(format!("Failed to initialize logging: {}", e)))
}
