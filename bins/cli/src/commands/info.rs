//! Info command handler.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, ndjson_summary, pretty_json};
use formcheck_adapters::adapters_crate_version;
use formcheck_config::config_crate_version;
use formcheck_form::form_crate_version;
use formcheck_ports::ports_crate_version;
use formcheck_shared::shared_crate_version;
use formcheck_validators::validators_crate_version;

const PACKAGE_NAME: &str = env!("CARGO_PKG_NAME");
const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the info command.
pub fn run_info(mode: OutputMode) -> Result<CliOutput, CliError> {
    let crates = crate_versions();

    let stdout = if mode.is_ndjson() {
        ndjson_summary("ok", "info", Some(build_json(&crates)))?
    } else if mode.is_json() {
        let mut payload = build_json(&crates);
        if let serde_json::Value::Object(map) = &mut payload {
            map.insert("status".to_string(), serde_json::Value::from("ok"));
        }
        pretty_json(&payload)?
    } else {
        format_info_text(&crates)
    };

    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}

fn crate_versions() -> [(&'static str, &'static str); 6] {
    [
        ("shared", shared_crate_version()),
        ("validators", validators_crate_version()),
        ("ports", ports_crate_version()),
        ("config", config_crate_version()),
        ("form", form_crate_version()),
        ("adapters", adapters_crate_version()),
    ]
}

fn build_json(crates: &[(&'static str, &'static str)]) -> serde_json::Value {
    let crates: serde_json::Map<String, serde_json::Value> = crates
        .iter()
        .map(|(name, version)| ((*name).to_string(), serde_json::Value::from(*version)))
        .collect();
    serde_json::json!({
        "build": {
            "name": PACKAGE_NAME,
            "version": PACKAGE_VERSION,
            "crates": crates,
        }
    })
}

fn format_info_text(crates: &[(&'static str, &'static str)]) -> String {
    let mut out = format!("status: ok\nname: {PACKAGE_NAME}\nversion: {PACKAGE_VERSION}\n");
    for (name, version) in crates {
        out.push_str(name);
        out.push_str(": ");
        out.push_str(version);
        out.push('\n');
    }
    out
}
