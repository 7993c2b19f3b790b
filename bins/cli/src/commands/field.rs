//! Field command handler: run one field rule.

use super::{field_status_json, load_rules, resolve_clock, status_label};
use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, format_error_output, log_info, ndjson_summary, pretty_json};
use formcheck_form::{Field, FieldStatus, FormController, FormDeps};
use formcheck_shared::{ErrorCode, ErrorEnvelope};
use formcheck_validators::assess_password;
use std::path::Path;

/// Inputs for the field command.
#[derive(Debug, Clone, Copy)]
pub struct FieldCommandInput<'a> {
    /// Field key (`name`, `birthDate`, ...).
    pub field: &'a str,
    /// Value to check.
    pub value: &'a str,
    /// Password the confirmation must match.
    pub reference: Option<&'a str>,
    /// Optional config file path (JSON/TOML).
    pub config_path: Option<&'a Path>,
    /// Optional JSON overrides (partial config).
    pub overrides_json: Option<&'a str>,
    /// Pinned evaluation date.
    pub today: Option<&'a str>,
}

/// Run the field command.
pub fn run_field(mode: OutputMode, input: FieldCommandInput<'_>) -> Result<CliOutput, CliError> {
    let clock = resolve_clock(input.today)?;
    let field = match input.field.parse::<Field>() {
        Ok(field) => field,
        Err(error) => return Ok(format_error_output(mode, &error)),
    };
    let rules = match load_rules(input.config_path, input.overrides_json) {
        Ok(rules) => rules,
        Err(error) => return Ok(format_error_output(mode, &error)),
    };

    let mut controller = FormController::new(rules, FormDeps { clock, logger: None });
    if let Some(reference) = input.reference {
        let applied = check_reference_target(field)
            .and_then(|()| controller.set(Field::Password, reference));
        if let Err(error) = applied {
            return Ok(format_error_output(mode, &error));
        }
    }
    let applied = match field {
        Field::Terms => parse_consent(input.value).map(|accepted| controller.set_terms(accepted)),
        _ => controller.set(field, input.value),
    };
    if let Err(error) = applied {
        return Ok(format_error_output(mode, &error));
    }
    controller.mark_touched(field);
    let status = controller.field_status(field);
    let valid = !matches!(status, FieldStatus::Error(_));

    let mut stderr = String::new();
    log_info(&mut stderr, "field check completed", mode.no_progress);

    let mut payload = field_status_json(field, &status);
    if let serde_json::Value::Object(map) = &mut payload {
        // `status` is reserved for the command result.
        if let Some(result) = map.remove("status") {
            map.insert("result".to_string(), result);
        }
        if field == Field::Password {
            let assessment = assess_password(input.value);
            map.insert(
                "password".to_string(),
                serde_json::json!({
                    "score": assessment.score,
                    "level": assessment.level.as_str(),
                }),
            );
        }
    }

    let stdout = if mode.is_ndjson() {
        ndjson_summary(result_label(valid), "field", Some(payload))?
    } else if mode.is_json() {
        if let serde_json::Value::Object(map) = &mut payload {
            map.insert("status".to_string(), serde_json::Value::from(result_label(valid)));
            map.insert("valid".to_string(), serde_json::Value::Bool(valid));
        }
        pretty_json(&payload)?
    } else {
        format_field_text(field, &status, input.value)
    };

    Ok(CliOutput {
        stdout,
        stderr,
        exit_code: if valid {
            ExitCode::Ok
        } else {
            ExitCode::NotSubmittable
        },
    })
}

const fn result_label(valid: bool) -> &'static str {
    if valid { "ok" } else { "invalid" }
}

/// `--reference` only feeds the confirmation rule.
fn check_reference_target(field: Field) -> Result<(), ErrorEnvelope> {
    if field == Field::Confirm {
        return Ok(());
    }
    Err(ErrorEnvelope::expected(
        ErrorCode::new("form", "invalid_reference"),
        format!("--reference only applies to `confirm`, not `{}`", field.key()),
    )
    .with_metadata("field", field.key()))
}

fn parse_consent(value: &str) -> Result<bool, ErrorEnvelope> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(ErrorEnvelope::expected(
            ErrorCode::new("form", "invalid_consent"),
            format!("terms value must be `true` or `false`, got `{other}`"),
        )),
    }
}

fn format_field_text(field: Field, status: &FieldStatus, value: &str) -> String {
    let valid = !matches!(status, FieldStatus::Error(_));
    let mut out = format!(
        "status: {}\nfield: {}\nvalid: {valid}\nresult: {}\n",
        result_label(valid),
        field.key(),
        status_label(status),
    );
    if let FieldStatus::Error(error) = status {
        out.push_str("code: ");
        out.push_str(error.code());
        out.push('\n');
    }
    if let Some(message) = status.message(field) {
        out.push_str("message: ");
        out.push_str(&message);
        out.push('\n');
    }
    if field == Field::Password {
        let assessment = assess_password(value);
        out.push_str(&format!(
            "strength: {} (score {})\n",
            assessment.level, assessment.score
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcheck_validators::FieldError;

    #[test]
    fn consent_accepts_true_and_false_only() -> Result<(), ErrorEnvelope> {
        assert!(parse_consent("TRUE")?);
        assert!(!parse_consent(" false ")?);
        let error = parse_consent("yes").err();
        assert_eq!(
            error.map(|envelope| envelope.code),
            Some(ErrorCode::new("form", "invalid_consent"))
        );
        Ok(())
    }

    #[test]
    fn reference_is_limited_to_confirm() {
        assert!(check_reference_target(Field::Confirm).is_ok());
        let error = check_reference_target(Field::Password).err();
        assert_eq!(
            error.map(|envelope| envelope.code),
            Some(ErrorCode::new("form", "invalid_reference"))
        );
    }

    #[test]
    fn password_text_never_echoes_the_value() {
        let text = format_field_text(
            Field::Password,
            &FieldStatus::Error(FieldError::WeakPassword),
            "abc",
        );
        assert!(text.contains("code: weak_password\n"));
        assert!(text.contains("strength: weak (score 0)\n"));
        assert!(!text.contains("abc\n"));
    }

    #[test]
    fn empty_optional_reports_hint() {
        let text = format_field_text(Field::Website, &FieldStatus::Empty, "");
        assert!(text.contains("valid: true\nresult: empty\n"));
        assert!(text.contains(formcheck_form::EMPTY_OPTIONAL_HINT));
    }
}
