//! Diagnostic logging for the CLI process.

use flexi_logger::{Logger, LoggerHandle};

use crate::CliError;

/// Level used when `RUST_LOG` is unset.
const DEFAULT_LEVEL: &str = "warn";

/// Send `log` records to standard error, filtered by `RUST_LOG`.
///
/// Keep the returned handle alive for as long as the process should log.
///
/// # Errors
/// Returns [`CliError::Logging`] when the filter is invalid or a logger is
/// already installed.
pub fn init_logging() -> Result<LoggerHandle, CliError> {
    let handle = Logger::try_with_env_or_str(DEFAULT_LEVEL)?
        .log_to_stderr()
        .start()?;
    Ok(handle)
}
