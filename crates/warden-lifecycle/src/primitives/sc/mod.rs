//! Service primitives backed by the `sc.exe` service control tool.

mod parse;

use std::io;
use std::process::Command;
use std::sync::Arc;

use tracing::debug;

use super::{ServiceError, ServiceManager, ServiceOperation, ServiceSpec, ServiceStatus};

/// Captured result of running an external program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, or `None` when the process was terminated by a signal.
    pub status: Option<i32>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl CommandOutput {
    fn succeeded(&self) -> bool {
        self.status == Some(0)
    }
}

/// Runs external programs to completion.
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args` and captures its output.
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput>;
}

/// Runs programs with [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput> {
        let output = Command::new(program).args(args).output()?;
        Ok(CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// [`ServiceManager`] that shells out to `sc.exe`.
#[derive(Debug, Clone)]
pub struct ScServiceManager<R> {
    program: String,
    runner: R,
}

impl<R> ScServiceManager<R>
where
    R: CommandRunner,
{
    /// Builds a manager that invokes `program` through `runner`.
    #[must_use]
    pub fn new(program: impl Into<String>, runner: R) -> Self {
        Self {
            program: program.into(),
            runner,
        }
    }

    fn invoke(
        &self,
        operation: ServiceOperation,
        service: &str,
        args: Vec<String>,
    ) -> Result<CommandOutput, ServiceError> {
        debug!(
            target: "warden::sc",
            program = %self.program,
            %operation,
            service,
            "invoking service control tool"
        );
        let output = self
            .runner
            .run(&self.program, &args)
            .map_err(|source| ServiceError::Launch {
                program: self.program.clone(),
                source: Arc::new(source),
            })?;
        if output.succeeded() {
            return Ok(output);
        }
        Err(Self::failure(operation, service, &output))
    }

    fn failure(operation: ServiceOperation, service: &str, output: &CommandOutput) -> ServiceError {
        let code = parse::failure_code(&output.stdout)
            .or_else(|| parse::failure_code(&output.stderr))
            .or(output.status.filter(|status| *status != 0));
        if let Some(raw_code) = code {
            return ServiceError::platform(operation, service, raw_code);
        }
        let message = parse::first_meaningful_line(&output.stderr)
            .or_else(|| parse::first_meaningful_line(&output.stdout))
            .map_or_else(
                || String::from("service control tool terminated without an exit code"),
                str::to_owned,
            );
        ServiceError::Rejected { message }
    }
}

fn arguments<const N: usize>(parts: [&str; N]) -> Vec<String> {
    parts.into_iter().map(str::to_owned).collect()
}

impl<R> ServiceManager for ScServiceManager<R>
where
    R: CommandRunner,
{
    fn create(&self, spec: &ServiceSpec) -> Result<(), ServiceError> {
        let binary = spec
            .binary_path()
            .ok_or_else(|| ServiceError::MissingBinary {
                service: spec.name().to_owned(),
            })?;
        let args = arguments([
            "create",
            spec.name(),
            "binPath=",
            binary.as_str(),
            "DisplayName=",
            spec.display_name(),
            "start=",
            "demand",
        ]);
        self.invoke(ServiceOperation::Create, spec.name(), args)
            .map(drop)
    }

    fn start(&self, name: &str) -> Result<(), ServiceError> {
        self.invoke(ServiceOperation::Start, name, arguments(["start", name]))
            .map(drop)
    }

    fn stop(&self, name: &str) -> Result<(), ServiceError> {
        self.invoke(ServiceOperation::Stop, name, arguments(["stop", name]))
            .map(drop)
    }

    fn query_status(&self, name: &str) -> Result<ServiceStatus, ServiceError> {
        let output = self.invoke(ServiceOperation::Query, name, arguments(["query", name]))?;
        parse::state_code(&output.stdout)
            .and_then(ServiceStatus::from_state_code)
            .ok_or_else(|| ServiceError::Rejected {
                message: format!("could not read the state of service '{name}' from sc.exe output"),
            })
    }

    fn mark_for_deletion(&self, name: &str) -> Result<(), ServiceError> {
        self.invoke(ServiceOperation::Delete, name, arguments(["delete", name]))
            .map(drop)
    }
}

#[cfg(test)]
mod tests;
