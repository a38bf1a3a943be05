//! Execution of the parsed subcommands.

use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;

use tracing::info;
use warden_config::Config;
use warden_lifecycle::primitives::{
    ServiceInstaller, ServiceUninstaller, UninstallPolicy, manager_for,
};
use warden_lifecycle::{
    AssumeYesGate, Collaborators, ConfirmationGate, ConsoleNotifier, InputReader,
    LifecycleOrchestrator, NoPauseInput, ServiceManager, ServiceSpec, WaitSpec, classifier,
    describe,
};

use crate::AppError;
use crate::console::{ConsoleAcknowledgement, ConsoleGate, SharedWriter};

/// Console options for `warden run`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RunOptions {
    pub(crate) assume_yes: bool,
    pub(crate) no_pause: bool,
}

pub(crate) fn run_lifecycle<R, W>(
    config: &Config,
    options: RunOptions,
    stdin: &mut R,
    stdout: &mut W,
) -> Result<ExitCode, AppError>
where
    R: BufRead,
    W: Write,
{
    if config.backend().is_simulated() {
        info!(
            target: "warden::cli",
            backend = %config.backend(),
            "using the in-memory service database; the host is not modified"
        );
    }

    let manager = manager_for(config);
    let spec = ServiceSpec::from_config(config);
    let installer = ServiceInstaller::new(Arc::clone(&manager), spec.clone());
    let uninstaller = ServiceUninstaller::new(
        manager,
        spec.name(),
        UninstallPolicy::from_config(config),
    );

    let input = RefCell::new(stdin);
    let output = RefCell::new(stdout);
    let notifier = ConsoleNotifier::new(SharedWriter::new(&output));
    let mut gate: Box<dyn ConfirmationGate + '_> = if options.assume_yes {
        Box::new(AssumeYesGate)
    } else {
        Box::new(ConsoleGate::new(&input, &output, spec.name()))
    };
    let mut acknowledgement: Box<dyn InputReader + '_> = if options.no_pause {
        Box::new(NoPauseInput)
    } else {
        Box::new(ConsoleAcknowledgement::new(&input))
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(AppError::Runtime)?;
    let mut orchestrator = LifecycleOrchestrator::new(
        Collaborators {
            gate: gate.as_mut(),
            installer: &installer,
            uninstaller: &uninstaller,
            notifier: &notifier,
            input: acknowledgement.as_mut(),
        },
        WaitSpec::from_config(config),
    );
    let report = runtime.block_on(orchestrator.run())?;

    if report.is_clean() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

pub(crate) fn print_status<W>(config: &Config, stdout: &mut W) -> Result<ExitCode, AppError>
where
    W: Write,
{
    let manager = manager_for(config);
    let name = config.service_name();
    let written = match manager.query_status(name) {
        Ok(status) => writeln!(stdout, "service '{name}' is {status}"),
        Err(error) if error.has_code(classifier::codes::SERVICE_DOES_NOT_EXIST) => {
            writeln!(stdout, "service '{name}' is not installed")
        }
        Err(error) => return Err(AppError::Status(error)),
    };
    written.map_err(AppError::Output)?;
    Ok(ExitCode::SUCCESS)
}

pub(crate) fn explain<W>(code: i32, stdout: &mut W) -> Result<ExitCode, AppError>
where
    W: Write,
{
    writeln!(stdout, "{}", describe(code)).map_err(AppError::Output)?;
    Ok(ExitCode::SUCCESS)
}
