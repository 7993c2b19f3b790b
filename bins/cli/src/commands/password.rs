//! Password command handler: strength assessment only.

use super::read_stdin;
use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, log_info, ndjson_summary, pretty_json};
use formcheck_validators::{MAX_SCORE, PasswordAssessment, assess_password};

/// Run the password command. The value itself is never echoed.
pub fn run_password(
    mode: OutputMode,
    value: Option<&str>,
    from_stdin: bool,
) -> Result<CliOutput, CliError> {
    let secret = if from_stdin {
        read_stdin("password")?
    } else {
        value
            .map(str::to_owned)
            .ok_or_else(|| CliError::InvalidInput("missing --value or --stdin".to_string()))?
    };
    let assessment = assess_password(&secret);
    let accepted = assessment.result.is_ok();

    let mut stderr = String::new();
    log_info(&mut stderr, "password assessed", mode.no_progress);

    let stdout = if mode.is_ndjson() {
        ndjson_summary(
            result_label(accepted),
            "password",
            Some(assessment_json(&assessment)),
        )?
    } else if mode.is_json() {
        let mut payload = assessment_json(&assessment);
        if let serde_json::Value::Object(map) = &mut payload {
            map.insert("status".to_string(), serde_json::Value::from(result_label(accepted)));
        }
        pretty_json(&payload)?
    } else {
        format_password_text(&assessment)
    };

    Ok(CliOutput {
        stdout,
        stderr,
        exit_code: if accepted {
            ExitCode::Ok
        } else {
            ExitCode::NotSubmittable
        },
    })
}

const fn result_label(accepted: bool) -> &'static str {
    if accepted { "ok" } else { "invalid" }
}

fn assessment_json(assessment: &PasswordAssessment) -> serde_json::Value {
    let mut payload = serde_json::json!({
        "score": assessment.score,
        "maxScore": MAX_SCORE,
        "level": assessment.level.as_str(),
        "accepted": assessment.result.is_ok(),
    });
    if let (Err(error), serde_json::Value::Object(map)) = (assessment.result, &mut payload) {
        map.insert(
            "error".to_string(),
            serde_json::json!({ "code": error.code(), "message": error.to_string() }),
        );
    }
    payload
}

fn format_password_text(assessment: &PasswordAssessment) -> String {
    let mut out = format!(
        "status: {}\nscore: {}/{MAX_SCORE}\nlevel: {}\naccepted: {}\n",
        result_label(assessment.result.is_ok()),
        assessment.score,
        assessment.level,
        assessment.result.is_ok(),
    );
    if let Err(error) = assessment.result {
        out.push_str("code: ");
        out.push_str(error.code());
        out.push_str("\nmessage: ");
        out.push_str(&error.to_string());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{OutputArgs, OutputFormat};

    fn mode(output: OutputFormat) -> OutputMode {
        OutputMode::from_args(&OutputArgs {
            output: Some(output),
            no_progress: true,
            json: false,
        })
    }

    #[test]
    fn strong_password_text() -> Result<(), CliError> {
        let output = run_password(mode(OutputFormat::Text), Some("Abcdefg1!xyz"), false)?;
        assert_eq!(output.exit_code, ExitCode::Ok);
        assert!(output.stdout.contains("score: 5/5\nlevel: strong\naccepted: true\n"));
        assert!(!output.stdout.contains("Abcdefg1!xyz"));
        Ok(())
    }

    #[test]
    fn weak_password_json_carries_error_code() -> Result<(), Box<dyn std::error::Error>> {
        let output = run_password(mode(OutputFormat::Json), Some("abcdefgh"), false)?;
        assert_eq!(output.exit_code, ExitCode::NotSubmittable);
        let value: serde_json::Value = serde_json::from_str(output.stdout.trim())?;
        assert_eq!(value["status"], "invalid");
        assert_eq!(value["score"], 1);
        assert_eq!(value["level"], "weak");
        assert_eq!(value["error"]["code"], "weak_password");
        Ok(())
    }

    #[test]
    fn missing_value_is_invalid_input() {
        let result = run_password(mode(OutputFormat::Text), None, false);
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }
}
