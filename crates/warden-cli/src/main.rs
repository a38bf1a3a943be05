//! CLI entrypoint for the Warden service lifecycle tool.
//!
//! The binary delegates to [`warden_cli::run`], which loads configuration,
//! installs telemetry, and drives the requested command against the locked
//! standard streams.

use std::io::{self, StderrLock, StdinLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdin: StdinLock<'static> = io::stdin().lock();
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    warden_cli::run(std::env::args_os(), &mut stdin, &mut stdout, &mut stderr)
}
