//! CLI argument definitions for the Warden tool.

use clap::{Parser, Subcommand};

/// Command-line interface for the Warden service lifecycle tool.
///
/// Configuration flags such as `--service-name` or `--wait-ms` are consumed
/// before this parser runs and must precede the command.
#[derive(Parser, Debug)]
#[command(name = "warden", disable_help_subcommand = true)]
pub(crate) struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Structured subcommands for the Warden CLI.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CliCommand {
    /// Confirms, installs, observes, and uninstalls the configured service.
    Run {
        /// Skips the confirmation prompt and proceeds.
        #[arg(long)]
        assume_yes: bool,
        /// Exits without waiting for a final key press.
        #[arg(long)]
        no_pause: bool,
    },
    /// Prints the current status of the configured service.
    Status,
    /// Describes a raw service control error code.
    Explain {
        /// Platform error code, for example `1060`.
        #[arg(allow_negative_numbers = true)]
        code: i32,
    },
}
