//! Notesweep - maintenance CLI for a note application's local data store
//!
//! Reconciles the application's SQLite database against its sync directory
//! (or an export archive) and disposes of orphaned records.

mod cli;
mod commands;

use std::env;
use std::process::ExitCode;

use clap::Parser;

use cli::{Cli, OutputFormat};
use notesweep_core::error::{ExitCode as SweepExitCode, SweepError};
use notesweep_core::logging;

fn main() -> ExitCode {
    let argv_format_json = argv_requests_json();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // `--format` is a global flag, but clap may fail parsing before we
            // can inspect `Cli.format`. If the user requested JSON output,
            // emit a structured error envelope.
            if argv_format_json {
                let sweep_error = match err.kind() {
                    // Help and version are informational - let clap handle them
                    clap::error::ErrorKind::DisplayHelp
                    | clap::error::ErrorKind::DisplayVersion => err.exit(),
                    clap::error::ErrorKind::ValueValidation
                    | clap::error::ErrorKind::InvalidValue
                    | clap::error::ErrorKind::InvalidSubcommand
                    | clap::error::ErrorKind::UnknownArgument
                    | clap::error::ErrorKind::MissingRequiredArgument => {
                        SweepError::UsageError(err.to_string())
                    }
                    clap::error::ErrorKind::ArgumentConflict => SweepError::DuplicateFormat,
                    _ => SweepError::Other(err.to_string()),
                };

                eprintln!("{}", sweep_error.to_json());
                return ExitCode::from(sweep_error.exit_code() as u8);
            }

            err.exit();
        }
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    match commands::run(&cli) {
        Ok(()) => ExitCode::from(SweepExitCode::Success as u8),
        Err(e) => {
            let exit_code = e.exit_code();

            if cli.format == OutputFormat::Json {
                eprintln!("{}", e.to_json());
            } else if !cli.quiet {
                eprintln!("error: {}", e);
            }

            ExitCode::from(exit_code as u8)
        }
    }
}

fn argv_requests_json() -> bool {
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--format" {
            if args.next().is_some_and(|v| v == "json") {
                return true;
            }
        } else if arg == "--format=json" {
            return true;
        }
    }
    false
}
