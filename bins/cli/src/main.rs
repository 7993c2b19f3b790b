//! CLI binary entrypoint.

mod commands;
mod error;
mod format;
mod logging;

use clap::{Parser, Subcommand};
use commands::{
    CheckCommandInput, ConfigRenderFormat, FieldCommandInput, run_check, run_config_show,
    run_field, run_info, run_password,
};
use error::{CliError, ExitCode};
use format::{OutputArgs, OutputMode, format_error_output};
use formcheck_ports::LoggerPort;
use logging::init_logger;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(
    name = "formcheck",
    version,
    about = "Registration form validation CLI",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    output: OutputArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Evaluate a registration document (`FormInput` JSON) as a submit.
    Check {
        /// Path to the `FormInput` JSON document.
        #[arg(long, conflicts_with = "stdin")]
        input: Option<PathBuf>,
        /// Read the document from stdin.
        #[arg(long)]
        stdin: bool,
        /// Optional config file path (JSON/TOML).
        #[arg(long)]
        config: Option<PathBuf>,
        /// Optional JSON overrides (partial config).
        #[arg(long)]
        overrides_json: Option<String>,
        /// Evaluate as of this date (`YYYY-MM-DD`) instead of today.
        #[arg(long)]
        today: Option<String>,
    },
    /// Run one field rule against a value.
    Field {
        /// Field key (`name`, `email`, `birthDate`, `terms`, ...).
        #[arg(long)]
        field: String,
        /// Value to check; `terms` accepts `true` or `false`.
        #[arg(long, allow_hyphen_values = true)]
        value: String,
        /// Password the `confirm` field must match.
        #[arg(long, allow_hyphen_values = true)]
        reference: Option<String>,
        /// Optional config file path (JSON/TOML).
        #[arg(long)]
        config: Option<PathBuf>,
        /// Optional JSON overrides (partial config).
        #[arg(long)]
        overrides_json: Option<String>,
        /// Evaluate as of this date (`YYYY-MM-DD`) instead of today.
        #[arg(long)]
        today: Option<String>,
    },
    /// Score a password.
    Password {
        /// Password to score.
        #[arg(long, conflicts_with = "stdin", allow_hyphen_values = true)]
        value: Option<String>,
        /// Read the password from stdin.
        #[arg(long)]
        stdin: bool,
    },
    /// Config-related commands.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Show package and crate versions.
    Info,
}

#[derive(Debug, Subcommand)]
enum ConfigCommands {
    /// Show the effective config after applying file, overrides, and env.
    Show {
        /// Optional config file path (JSON/TOML).
        #[arg(long)]
        path: Option<PathBuf>,
        /// Optional JSON overrides (partial config).
        #[arg(long)]
        overrides_json: Option<String>,
        /// Rendering for text output.
        #[arg(long, value_enum, default_value_t = ConfigRenderFormat::Json)]
        format: ConfigRenderFormat,
    },
}

pub(crate) struct CliOutput {
    stdout: String,
    stderr: String,
    exit_code: ExitCode,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let mode = OutputMode::from_args(&cli.output);

    let result = match init_logger(&collect_scoped_env("FORMCHECK_")) {
        Ok(logger) => run(&cli.command, mode, logger),
        Err(error) => Ok(format_error_output(mode, &error)),
    };

    match result {
        Ok(output) => match write_output(&output) {
            Ok(()) => std::process::ExitCode::from(output.exit_code.as_u8()),
            Err(error) => exit_with_error(&error),
        },
        Err(error) => exit_with_error(&error),
    }
}

fn exit_with_error(error: &CliError) -> std::process::ExitCode {
    let _ = writeln!(io::stderr(), "error: {error}");
    std::process::ExitCode::from(error.exit_code().as_u8())
}

fn run(
    command: &Commands,
    mode: OutputMode,
    logger: Option<Arc<dyn LoggerPort>>,
) -> Result<CliOutput, CliError> {
    match command {
        Commands::Check {
            input,
            stdin,
            config,
            overrides_json,
            today,
        } => run_check(
            mode,
            CheckCommandInput {
                input_path: input.as_deref(),
                from_stdin: *stdin,
                config_path: config.as_deref(),
                overrides_json: overrides_json.as_deref(),
                today: today.as_deref(),
            },
            logger,
        ),
        Commands::Field {
            field,
            value,
            reference,
            config,
            overrides_json,
            today,
        } => run_field(
            mode,
            FieldCommandInput {
                field,
                value,
                reference: reference.as_deref(),
                config_path: config.as_deref(),
                overrides_json: overrides_json.as_deref(),
                today: today.as_deref(),
            },
        ),
        Commands::Password { value, stdin } => run_password(mode, value.as_deref(), *stdin),
        Commands::Config { command } => match command {
            ConfigCommands::Show {
                path,
                overrides_json,
                format,
            } => run_config_show(mode, path.as_deref(), overrides_json.as_deref(), *format),
        },
        Commands::Info => run_info(mode),
    }
}

fn write_output(output: &CliOutput) -> Result<(), CliError> {
    let mut stdout = io::stdout();
    stdout.write_all(output.stdout.as_bytes())?;

    if !output.stderr.is_empty() {
        let mut stderr = io::stderr();
        stderr.write_all(output.stderr.as_bytes())?;
        stderr.flush()?;
    }

    Ok(())
}

fn collect_scoped_env(prefix: &str) -> BTreeMap<String, String> {
    std::env::vars()
        .filter(|(key, _)| key.starts_with(prefix))
        .collect()
}
