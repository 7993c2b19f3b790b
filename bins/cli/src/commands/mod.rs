//! CLI command handlers.

pub mod check;
pub mod config;
pub mod field;
pub mod info;
pub mod password;

pub use check::{CheckCommandInput, run_check};
pub use config::{ConfigRenderFormat, run_config_show};
pub use field::{FieldCommandInput, run_field};
pub use info::run_info;
pub use password::run_password;

use crate::error::CliError;
use formcheck_adapters::{FixedClock, SystemClock};
use formcheck_config::load_form_config_std_env;
use formcheck_form::{Field, FieldStatus, FormRules};
use formcheck_ports::ClockPort;
use formcheck_shared::ErrorEnvelope;
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;

/// Load the effective config and turn it into field rules.
fn load_rules(
    config_path: Option<&Path>,
    overrides_json: Option<&str>,
) -> Result<FormRules, ErrorEnvelope> {
    let config = load_form_config_std_env(config_path, overrides_json)?;
    Ok(FormRules::from_config(&config))
}

/// `--today YYYY-MM-DD` pins the clock; otherwise the local date is used.
fn resolve_clock(today: Option<&str>) -> Result<Arc<dyn ClockPort>, CliError> {
    match today {
        None => Ok(Arc::new(SystemClock)),
        Some(value) => FixedClock::parse(value)
            .map(|clock| Arc::new(clock) as Arc<dyn ClockPort>)
            .ok_or_else(|| {
                CliError::InvalidInput(format!("--today must be YYYY-MM-DD, got `{value}`"))
            }),
    }
}

/// Read stdin, dropping the trailing line break.
fn read_stdin(what: &str) -> Result<String, CliError> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    let value = buf.trim_end_matches(['\n', '\r']);
    if value.is_empty() {
        return Err(CliError::InvalidInput(format!("stdin {what} is empty")));
    }
    Ok(value.to_string())
}

const fn status_label(status: &FieldStatus) -> &'static str {
    match status {
        FieldStatus::Hidden => "hidden",
        FieldStatus::Ok => "ok",
        FieldStatus::Error(_) => "error",
        FieldStatus::Empty => "empty",
    }
}

/// JSON view of one field status. Values are never included.
fn field_status_json(field: Field, status: &FieldStatus) -> serde_json::Value {
    let mut payload = serde_json::json!({
        "field": field.key(),
        "label": field.label(),
        "status": status_label(status),
        "message": status.message(field),
    });
    if let (FieldStatus::Error(error), serde_json::Value::Object(map)) = (status, &mut payload) {
        map.insert("code".to_string(), serde_json::Value::from(error.code()));
    }
    payload
}

/// One `key: status (code) - message` text line.
fn field_status_line(field: Field, status: &FieldStatus) -> String {
    let mut line = format!("  {}: {}", field.key(), status_label(status));
    if let FieldStatus::Error(error) = status {
        line.push_str(" (");
        line.push_str(error.code());
        line.push(')');
    }
    if let Some(message) = status.message(field) {
        line.push_str(" - ");
        line.push_str(&message);
    }
    line.push('\n');
    line
}
