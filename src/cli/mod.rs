use std::process::ExitCode;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

mod args;
mod commands;
mod exit_status;
mod report;
mod run;

pub use args::{Arguments, CheckArgs, CheckCommand, Command, CommonArgs, OutputFormat};
pub use commands::{CommandResult, CommandSummary};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitCode> {
    let verbose = args.verbose();
    init_logging(verbose);

    let format = match &args.command {
        Some(Command::Check(cmd)) => cmd.args.common.format,
        Some(Command::Init) | None => OutputFormat::Text,
    };

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success.into());
    };

    let result = run::run(args)?;
    report::print(&result, format, verbose);

    Ok(exit_status_from_result(&result).into())
}

/// Any issue, error or warning, fails the run.
fn exit_status_from_result(result: &CommandResult) -> ExitStatus {
    if result.error_count + result.warning_count > 0 {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    }
}

/// Install the tracing subscriber on stderr.
///
/// `RUST_LOG` wins; otherwise only errors are logged, or debug output of
/// this crate with `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "l10nscan=debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
