//! Entry point for the `ic-hdl-gen` binary.

use std::process::ExitCode;

use clap::Parser;
use ichdl_cli::cli::Cli;
use ichdl_cli::Exit;
use ichdl_common_config::Environment;
use tracing::{debug, warn};

fn main() -> ExitCode {
    // `.env` may carry ICHDL_CONFIG, so load it before clap reads the environment.
    let env = std::env::current_dir()
        .map_err(|e| e.to_string())
        .and_then(|dir| Environment::init(dir).map_err(|e| e.to_string()));

    let cli = Cli::parse();

    if let Err(e) = ichdl_common_log::init(cli.log_config()) {
        eprintln!("warning: logging disabled: {e}");
    }

    match env {
        Ok(env) if !env.loaded_files().is_empty() => {
            debug!(files = ?env.loaded_files(), "loaded environment files");
        }
        Ok(_) => {}
        Err(e) => warn!("failed to load .env: {e}"),
    }

    match cli.run() {
        Ok(()) => Exit::Success.into(),
        Err(e) => {
            debug!(error = ?e, "command failed");
            cli.report_error(&e);
            e.exit_code()
        }
    }
}
