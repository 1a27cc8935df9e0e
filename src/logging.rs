//! Process-wide logger for the CLI.
//!
//! Library code only uses the `log` macros with `event=... module=...`
//! key/value messages; this module wires them to stderr so stdout stays
//! reserved for command output.

use anyhow::{Context, Result};
use flexi_logger::{Logger, LoggerHandle};

/// Environment variable that overrides the configured level.
pub const LOG_ENV: &str = "PROJAI_LOG";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Start the stderr logger. Level precedence: `PROJAI_LOG`, then the
/// configured level, then `warn`. Keep the returned handle alive.
pub fn init_logging(configured: Option<&str>) -> Result<LoggerHandle> {
    let from_env = std::env::var(LOG_ENV).ok();
    let requested = from_env
        .as_deref()
        .or(configured)
        .unwrap_or(DEFAULT_LOG_LEVEL);
    let level = normalize_level(requested)?;

    let handle = Logger::try_with_str(level)
        .with_context(|| format!("invalid log level `{level}`"))?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
        .context("failed to start logger")?;

    log::debug!(
        "event=app_start module=logging status=ok level={level} version={}",
        env!("CARGO_PKG_VERSION")
    );
    Ok(handle)
}

fn normalize_level(level: &str) -> Result<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" => Ok("off"),
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => anyhow::bail!("unsupported log level `{other}`; expected off|trace|debug|info|warn|error"),
    }
}
