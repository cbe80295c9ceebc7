//! CLI entry point and dispatch logic.
//!
//! `run()` parses arguments, discovers configuration, initializes tracing,
//! creates the async runtime, and dispatches to the matching subcommand. It
//! owns all error output: `main.rs` only maps the returned [`ExitCode`] to a
//! process exit status.

use clap::Parser;

use assemblyzero_utils::ExitCode;

use super::args::{Cli, Commands};
use super::commands;
use crate::config::Config;

pub fn run() -> Result<(), ExitCode> {
    let cli = Cli::parse();

    if let Err(e) = assemblyzero_utils::logging::init_tracing(cli.verbose) {
        eprintln!("warning: failed to initialize logging: {e}");
    }

    let config = Config::discover(cli.config.as_deref()).map_err(|e| {
        eprintln!("error: failed to load configuration: {e:#}");
        ExitCode::Fatal
    })?;

    let rt = tokio::runtime::Runtime::new().map_err(|e| {
        eprintln!("error: failed to create async runtime: {e}");
        ExitCode::Fatal
    })?;

    let result = rt.block_on(async {
        match cli.command {
            Commands::Run {
                issue,
                lld,
                auto,
                scaffold_only,
                skip_docs,
                repo_root,
                max_iterations,
            } => {
                commands::execute_run(
                    issue,
                    lld,
                    auto,
                    scaffold_only,
                    skip_docs,
                    repo_root,
                    max_iterations,
                    &config,
                )
                .await
            }
            Commands::Resume { workflow_id } => commands::execute_resume(workflow_id, &config).await,
            Commands::List { json } => commands::execute_list(json).await,
            Commands::Doctor { json } => {
                let ok = commands::execute_doctor(json).await;
                if ok {
                    Ok(())
                } else {
                    Err(assemblyzero_utils::AssemblyZeroError::Fatal(
                        "one or more doctor checks failed".to_string(),
                    ))
                }
            }
        }
    });

    if let Err(err) = result {
        eprintln!("error: {err}");
        return Err(err.to_exit_code());
    }

    Ok(())
}
