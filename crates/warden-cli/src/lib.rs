//! Command-line runtime for the Warden service lifecycle tool.
//!
//! The crate owns argument parsing, configuration bootstrapping, telemetry,
//! and the wiring of console collaborators into the lifecycle orchestrator.
//! [`run`] is exercised both by the binary entrypoint and by tests, where the
//! standard streams are replaced with in-memory buffers.

use std::ffi::OsString;
use std::io::{BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing::warn;
use warden_config::Config;

mod cli;
mod commands;
mod config;
mod console;
mod errors;
mod telemetry;

use cli::{Cli, CliCommand};
use commands::RunOptions;
use config::{ConfigArgumentSplit, split_config_arguments};
pub(crate) use config::{ConfigLoader, OrthoConfigLoader};
pub(crate) use errors::AppError;

/// CLI flags recognised by the configuration loader.
///
/// Keep in sync with the fields of [`warden_config::Config`].
const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--service-name",
    "--display-name",
    "--binary-path",
    "--backend",
    "--sc-program",
    "--wait-ms",
    "--poll-interval-ms",
    "--stop-timeout-ms",
    "--removal-timeout-ms",
    "--log-filter",
    "--log-format",
];

/// Bundles the standard streams handed to the CLI runtime.
struct IoStreams<'a, R, W, E> {
    stdin: &'a mut R,
    stdout: &'a mut W,
    stderr: &'a mut E,
}

struct CliRunner<'a, R, W, E, L> {
    io: IoStreams<'a, R, W, E>,
    loader: &'a L,
}

impl<'a, R, W, E, L> CliRunner<'a, R, W, E, L>
where
    R: BufRead,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    const fn new(io: IoStreams<'a, R, W, E>, loader: &'a L) -> Self {
        Self { io, loader }
    }

    fn run<I>(&mut self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        let split = split_config_arguments(&args);
        let cli_arguments = prepare_cli_arguments(&args, &split);

        let cli = match Cli::try_parse_from(cli_arguments) {
            Ok(cli) => cli,
            Err(error) if !error.use_stderr() => {
                return self.write_help(&error);
            }
            Err(error) => return self.fail(&AppError::CliUsage(error)),
        };

        let result = self
            .loader
            .load(&split.config_arguments)
            .and_then(|config| {
                telemetry::initialise(&config)?;
                self.dispatch(cli.command, &config)
            });

        match result {
            Ok(exit_code) => exit_code,
            Err(error) => self.fail(&error),
        }
    }

    fn dispatch(&mut self, command: CliCommand, config: &Config) -> Result<ExitCode, AppError> {
        match command {
            CliCommand::Run {
                assume_yes,
                no_pause,
            } => commands::run_lifecycle(
                config,
                RunOptions {
                    assume_yes,
                    no_pause,
                },
                &mut *self.io.stdin,
                &mut *self.io.stdout,
            ),
            CliCommand::Status => commands::print_status(config, &mut *self.io.stdout),
            CliCommand::Explain { code } => commands::explain(code, &mut *self.io.stdout),
        }
    }

    fn write_help(&mut self, error: &clap::Error) -> ExitCode {
        if let Err(write_error) = write!(self.io.stdout, "{error}") {
            warn!(target: "warden::cli", error = %write_error, "failed to write help");
            return ExitCode::FAILURE;
        }
        ExitCode::SUCCESS
    }

    fn fail(&mut self, error: &AppError) -> ExitCode {
        if let Err(write_error) = writeln!(self.io.stderr, "{error}") {
            warn!(target: "warden::cli", error = %write_error, "failed to report error");
        }
        ExitCode::FAILURE
    }
}

fn prepare_cli_arguments(args: &[OsString], split: &ConfigArgumentSplit) -> Vec<OsString> {
    args.first()
        .into_iter()
        .chain(args.get(split.command_start..).unwrap_or_default())
        .cloned()
        .collect()
}

/// Runs the CLI using the provided arguments and standard streams.
#[must_use]
pub fn run<I, R, W, E>(args: I, stdin: &mut R, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: BufRead,
    W: Write,
    E: Write,
{
    run_with_loader(args, stdin, stdout, stderr, &OrthoConfigLoader)
}

/// Runs the CLI with a custom configuration loader.
fn run_with_loader<I, R, W, E, L>(
    args: I,
    stdin: &mut R,
    stdout: &mut W,
    stderr: &mut E,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: BufRead,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    let io = IoStreams {
        stdin,
        stdout,
        stderr,
    };
    CliRunner::new(io, loader).run(args)
}
