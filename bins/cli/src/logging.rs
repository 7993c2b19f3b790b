//! Logger selection from the process environment.
//!
//! `FORMCHECK_LOG_FORMAT=json` writes JSON lines to stderr, `text` routes
//! events through a `tracing` fmt subscriber, and unset disables logging.
//! `FORMCHECK_LOG_LEVEL` sets the minimum level (default `info`).

use formcheck_adapters::{JsonLogger, StderrLogSink, TracingLogger};
use formcheck_ports::{LogLevel, LoggerPort};
use formcheck_shared::{ErrorCode, ErrorEnvelope};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

pub const ENV_LOG_FORMAT: &str = "FORMCHECK_LOG_FORMAT";
pub const ENV_LOG_LEVEL: &str = "FORMCHECK_LOG_LEVEL";

/// Where log events go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Text,
}

/// Parsed logging settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogSettings {
    pub format: LogFormat,
    pub min_level: LogLevel,
}

impl LogSettings {
    /// Read settings from a scoped env map. `None` means logging is off.
    pub fn from_env(env: &BTreeMap<String, String>) -> Result<Option<Self>, ErrorEnvelope> {
        let Some(raw_format) = non_empty(env, ENV_LOG_FORMAT) else {
            return Ok(None);
        };
        let format = match raw_format.to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            "text" => LogFormat::Text,
            other => {
                return Err(ErrorEnvelope::expected(
                    ErrorCode::new("logging", "invalid_format"),
                    format!("{ENV_LOG_FORMAT} must be `json` or `text`, got `{other}`"),
                )
                .with_metadata("env_var", ENV_LOG_FORMAT));
            },
        };
        let min_level = match non_empty(env, ENV_LOG_LEVEL) {
            Some(level) => level
                .parse::<LogLevel>()
                .map_err(|error| error.with_metadata("env_var", ENV_LOG_LEVEL))?,
            None => LogLevel::Info,
        };
        Ok(Some(Self { format, min_level }))
    }
}

/// Build the logger for this process, installing a subscriber for text mode.
pub fn init_logger(
    env: &BTreeMap<String, String>,
) -> Result<Option<Arc<dyn LoggerPort>>, ErrorEnvelope> {
    let Some(settings) = LogSettings::from_env(env)? else {
        return Ok(None);
    };
    let logger: Arc<dyn LoggerPort> = match settings.format {
        LogFormat::Json => Arc::new(
            JsonLogger::new(Arc::new(StderrLogSink)).with_min_level(settings.min_level),
        ),
        LogFormat::Text => {
            // A second init in the same process keeps the first subscriber.
            let _ = tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(EnvFilter::new(settings.min_level.as_str()))
                .with_target(false)
                .with_ansi(false)
                .try_init();
            Arc::new(TracingLogger::new())
        },
    };
    Ok(Some(logger))
}

fn non_empty<'a>(env: &'a BTreeMap<String, String>, key: &str) -> Option<&'a str> {
    env.get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}
