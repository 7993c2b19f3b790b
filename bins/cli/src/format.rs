//! Output format helpers for CLI commands.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use clap::{Args, ValueEnum};
use formcheck_shared::{ErrorEnvelope, ErrorKind, REDACTED, is_secret_key};
use serde_json::Value;

/// Output format choices for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-friendly text output.
    Text,
    /// Machine-friendly JSON output.
    Json,
    /// Line-delimited JSON (NDJSON) output.
    Ndjson,
}

/// Output-related CLI flags.
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Output format for command responses.
    #[arg(long, global = true, value_enum)]
    pub output: Option<OutputFormat>,
    /// Suppress `info:` progress lines on stderr.
    #[arg(long, global = true)]
    pub no_progress: bool,
    /// Emit machine-readable JSON output (legacy alias).
    #[arg(long, global = true, hide = true)]
    pub json: bool,
}

/// Output mode derived from CLI flags.
#[derive(Debug, Clone, Copy)]
pub struct OutputMode {
    pub format: OutputFormat,
    pub no_progress: bool,
}

impl OutputMode {
    /// Build output mode from CLI flags.
    #[must_use]
    pub const fn from_args(args: &OutputArgs) -> Self {
        let format = match (args.output, args.json) {
            (Some(value), _) => value,
            (None, true) => OutputFormat::Json,
            (None, false) => OutputFormat::Text,
        };

        Self {
            format,
            no_progress: args.no_progress,
        }
    }

    /// Returns true when JSON output is requested.
    #[must_use]
    pub const fn is_json(self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Returns true when NDJSON output is requested.
    #[must_use]
    pub const fn is_ndjson(self) -> bool {
        matches!(self.format, OutputFormat::Ndjson)
    }
}

/// Pretty JSON with a trailing newline.
pub fn pretty_json(payload: &Value) -> Result<String, CliError> {
    let mut output = serde_json::to_string_pretty(payload)?;
    output.push('\n');
    Ok(output)
}

/// Compact JSON line with a trailing newline.
pub fn json_line(payload: &Value) -> Result<String, CliError> {
    let mut output = serde_json::to_string(payload)?;
    output.push('\n');
    Ok(output)
}

/// NDJSON summary record closing a command's output.
pub fn ndjson_summary(status: &str, kind: &str, extra: Option<Value>) -> Result<String, CliError> {
    let mut payload = serde_json::Map::new();
    payload.insert("type".to_string(), Value::from("summary"));
    payload.insert("status".to_string(), Value::from(status));
    payload.insert("kind".to_string(), Value::from(kind));
    if let Some(Value::Object(map)) = extra {
        payload.extend(map);
    }
    json_line(&Value::Object(payload))
}

/// Append an `info:` line unless progress output is suppressed.
pub fn log_info(stderr: &mut String, message: &str, no_progress: bool) {
    if no_progress {
        return;
    }
    stderr.push_str("info: ");
    stderr.push_str(message);
    stderr.push('\n');
}

/// Render an envelope as a command result with the matching exit code.
pub fn format_error_output(mode: OutputMode, error: &ErrorEnvelope) -> CliOutput {
    let dto = error_dto(error);

    let mut stderr = String::new();
    log_info(&mut stderr, "command failed", mode.no_progress);

    let stdout = if mode.is_ndjson() {
        let payload = serde_json::json!({
            "type": "error",
            "status": "error",
            "error": dto,
        });
        json_line(&payload).unwrap_or_else(|_| FALLBACK_ERROR_LINE.to_string())
    } else if mode.is_json() {
        let payload = serde_json::json!({
            "status": "error",
            "error": dto,
        });
        pretty_json(&payload).unwrap_or_else(|_| FALLBACK_ERROR_LINE.to_string())
    } else {
        format_error_text(error)
    };

    CliOutput {
        stdout,
        stderr,
        exit_code: ExitCode::for_envelope(error),
    }
}

const FALLBACK_ERROR_LINE: &str = "{\"status\":\"error\",\"error\":{\"code\":\"core:internal\",\"message\":\"internal error\",\"kind\":\"unexpected\"}}\n";

fn error_dto(error: &ErrorEnvelope) -> Value {
    let meta: serde_json::Map<String, Value> = error
        .metadata
        .iter()
        .map(|(key, value)| (key.clone(), Value::from(sanitize_meta(key, value))))
        .collect();
    let mut dto = serde_json::json!({
        "code": error.code.to_string(),
        "message": error.message,
        "kind": kind_label(error.kind),
    });
    if !meta.is_empty()
        && let Value::Object(map) = &mut dto
    {
        map.insert("meta".to_string(), Value::Object(meta));
    }
    dto
}

fn format_error_text(error: &ErrorEnvelope) -> String {
    let mut out = String::new();
    out.push_str("status: error\n");
    out.push_str("code: ");
    out.push_str(&error.code.to_string());
    out.push('\n');
    out.push_str("message: ");
    out.push_str(&error.message);
    out.push('\n');
    out.push_str("kind: ");
    out.push_str(kind_label(error.kind));
    out.push('\n');

    if !error.metadata.is_empty() {
        out.push_str("meta:\n");
        for (key, value) in &error.metadata {
            out.push_str("  ");
            out.push_str(key);
            out.push_str(": ");
            out.push_str(sanitize_meta(key, value));
            out.push('\n');
        }
    }

    out
}

fn sanitize_meta<'a>(key: &str, value: &'a str) -> &'a str {
    if is_secret_key(key) { REDACTED } else { value }
}

const fn kind_label(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Expected => "expected",
        ErrorKind::Invariant => "invariant",
        ErrorKind::Unexpected => "unexpected",
    }
}
