//! Check command handler: evaluate a whole registration document.

use super::{
    field_status_json, field_status_line, load_rules, read_stdin, resolve_clock, status_label,
};
use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{
    OutputMode, format_error_output, json_line, log_info, ndjson_summary, pretty_json,
};
use formcheck_form::{
    Field, FieldStatus, FormController, FormDeps, SubmitOutcome, parse_form_input_json,
};
use formcheck_ports::LoggerPort;
use formcheck_shared::ResultExt;
use formcheck_validators::{PasswordAssessment, assess_password};
use std::path::Path;
use std::sync::Arc;

/// Inputs for the check command.
#[derive(Debug, Clone, Copy)]
pub struct CheckCommandInput<'a> {
    /// `FormInput` JSON document path.
    pub input_path: Option<&'a Path>,
    /// Read the document from stdin instead.
    pub from_stdin: bool,
    /// Optional config file path (JSON/TOML).
    pub config_path: Option<&'a Path>,
    /// Optional JSON overrides (partial config).
    pub overrides_json: Option<&'a str>,
    /// Pinned evaluation date.
    pub today: Option<&'a str>,
}

/// Run the check command.
pub fn run_check(
    mode: OutputMode,
    input: CheckCommandInput<'_>,
    logger: Option<Arc<dyn LoggerPort>>,
) -> Result<CliOutput, CliError> {
    let clock = resolve_clock(input.today)?;
    let rules = match load_rules(input.config_path, input.overrides_json) {
        Ok(rules) => rules,
        Err(error) => return Ok(format_error_output(mode, &error)),
    };

    let (document, source) = read_document(input.input_path, input.from_stdin)?;
    let parsed = parse_form_input_json(&document).with_error_metadata("source", source);
    let form_input = match parsed {
        Ok(form_input) => form_input,
        Err(error) => return Ok(format_error_output(mode, &error)),
    };

    let mut controller = FormController::with_input(rules, FormDeps { clock, logger }, form_input);
    let submittable = matches!(controller.submit(), SubmitOutcome::Accepted(_));
    let statuses: Vec<(Field, FieldStatus)> = Field::ALL
        .into_iter()
        .map(|field| (field, controller.field_status(field)))
        .collect();
    let view = CheckView {
        submittable,
        banner: controller.banner().message(),
        password: assess_password(controller.input().password.expose()),
        statuses: &statuses,
    };

    let mut stderr = String::new();
    log_info(&mut stderr, "form check completed", mode.no_progress);

    let stdout = if mode.is_ndjson() {
        format_check_ndjson(&view)?
    } else if mode.is_json() {
        format_check_json(&view)?
    } else {
        format_check_text(&view)
    };

    Ok(CliOutput {
        stdout,
        stderr,
        exit_code: if submittable {
            ExitCode::Ok
        } else {
            ExitCode::NotSubmittable
        },
    })
}

struct CheckView<'a> {
    submittable: bool,
    banner: Option<&'static str>,
    password: PasswordAssessment,
    statuses: &'a [(Field, FieldStatus)],
}

impl CheckView<'_> {
    const fn status(&self) -> &'static str {
        if self.submittable { "ok" } else { "invalid" }
    }

    fn password_json(&self) -> serde_json::Value {
        serde_json::json!({
            "score": self.password.score,
            "level": self.password.level.as_str(),
        })
    }
}

/// Document text plus a label naming where it came from.
fn read_document(path: Option<&Path>, from_stdin: bool) -> Result<(String, String), CliError> {
    if from_stdin {
        return Ok((read_stdin("document")?, "stdin".to_string()));
    }
    let path =
        path.ok_or_else(|| CliError::InvalidInput("missing --input or --stdin".to_string()))?;
    Ok((
        std::fs::read_to_string(path)?,
        path.to_string_lossy().into_owned(),
    ))
}

fn format_check_text(view: &CheckView<'_>) -> String {
    let mut out = String::new();
    out.push_str("status: ");
    out.push_str(view.status());
    out.push('\n');
    out.push_str(&format!("submittable: {}\n", view.submittable));
    if let Some(banner) = view.banner {
        out.push_str("banner: ");
        out.push_str(banner);
        out.push('\n');
    }
    out.push_str(&format!(
        "password: {} (score {})\n",
        view.password.level, view.password.score
    ));
    out.push_str("fields:\n");
    for (field, status) in view.statuses {
        out.push_str(&field_status_line(*field, status));
    }
    out
}

fn format_check_json(view: &CheckView<'_>) -> Result<String, CliError> {
    let fields: Vec<serde_json::Value> = view
        .statuses
        .iter()
        .map(|(field, status)| field_status_json(*field, status))
        .collect();
    let payload = serde_json::json!({
        "status": view.status(),
        "submittable": view.submittable,
        "banner": view.banner,
        "password": view.password_json(),
        "fields": fields,
    });
    pretty_json(&payload)
}

fn format_check_ndjson(view: &CheckView<'_>) -> Result<String, CliError> {
    let mut out = String::new();
    for (field, status) in view.statuses {
        let mut record = field_status_json(*field, status);
        if let serde_json::Value::Object(map) = &mut record {
            map.insert("type".to_string(), serde_json::Value::from("field"));
        }
        out.push_str(&json_line(&record)?);
    }
    let invalid = view
        .statuses
        .iter()
        .filter(|(_, status)| status_label(status) == "error")
        .count();
    out.push_str(&ndjson_summary(
        view.status(),
        "check",
        Some(serde_json::json!({
            "submittable": view.submittable,
            "invalidCount": invalid,
            "password": view.password_json(),
        })),
    )?);
    Ok(out)
}
