//! Checks a recorded suggestion response against the contract.
//!
//! This binary delegates to `suggestion_contract::check_cli` for the check
//! itself, keeping the CLI behaviour testable without spawning a process.

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use suggestion_contract::CheckSettings;
use suggestion_contract::check_cli::{CliError, render_report, run_check};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Err(write_err) = writeln!(io::stderr().lock(), "{err}") {
                drop(write_err);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), CliError> {
    let settings = CheckSettings::load().map_err(|err| CliError::Config {
        message: err.to_string(),
    })?;
    let screened = run_check(&settings)?;
    write_report(&render_report(&screened));
    Ok(())
}

fn write_report(report: &str) {
    if let Err(err) = io::stdout().lock().write_all(report.as_bytes()) {
        drop(err);
    }
}
