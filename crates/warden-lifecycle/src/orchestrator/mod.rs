//! Gate, install, wait, uninstall, acknowledge.
//!
//! The orchestrator owns no service state of its own. It borrows each
//! collaborator for the duration of a run and converts every primitive
//! result into a [`StageOutcome`] before reporting it, so a failing stage
//! never short-circuits the stages after it.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::decision::LifecycleDecision;
use crate::gate::{ConfirmationGate, GateError};
use crate::input::InputReader;
use crate::notifier::Notifier;
use crate::outcome::{RunReport, Stage, StageOutcome};
use crate::primitives::{Installer, Uninstaller};
use crate::wait::WaitSpec;

/// Failures that end a run early.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The confirmation gate could not produce a decision.
    #[error("confirmation gate failed: {0}")]
    Gate(#[from] GateError),
}

/// Borrowed collaborators driven by one orchestrator.
pub struct Collaborators<'a> {
    /// Source of the proceed/abort decision.
    pub gate: &'a mut dyn ConfirmationGate,
    /// Install primitive.
    pub installer: &'a dyn Installer,
    /// Uninstall primitive.
    pub uninstaller: &'a dyn Uninstaller,
    /// Operator-facing status channel.
    pub notifier: &'a dyn Notifier,
    /// Final acknowledgement source.
    pub input: &'a mut dyn InputReader,
}

/// Sequences the lifecycle stages and reports their outcomes.
pub struct LifecycleOrchestrator<'a> {
    collaborators: Collaborators<'a>,
    wait: WaitSpec,
}

impl<'a> LifecycleOrchestrator<'a> {
    /// Builds an orchestrator over the given collaborators.
    #[must_use]
    pub const fn new(collaborators: Collaborators<'a>, wait: WaitSpec) -> Self {
        Self {
            collaborators,
            wait,
        }
    }

    /// Runs one lifecycle.
    ///
    /// On [`LifecycleDecision::Abort`] no service stage runs and nothing is
    /// presented; the final acknowledgement still happens. On
    /// [`LifecycleDecision::Proceed`] install, the wait notice, the wait,
    /// and uninstall run in that order regardless of individual stage
    /// results.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Gate`] when the gate fails. Stage failures
    /// are reported through the notifier and recorded in the [`RunReport`].
    pub async fn run(&mut self) -> Result<RunReport, LifecycleError> {
        let decision = self.collaborators.gate.decide()?;
        info!(target: "warden::lifecycle", %decision, "confirmation received");

        let report = match decision {
            LifecycleDecision::Abort => RunReport::aborted(),
            LifecycleDecision::Proceed => self.run_stages().await,
        };

        self.acknowledge();
        Ok(report)
    }

    async fn run_stages(&self) -> RunReport {
        let install = self.report(StageOutcome::from_result(
            Stage::Install,
            &self.collaborators.installer.install(),
        ));

        self.collaborators.notifier.present(&self.wait.notice());
        debug!(
            target: "warden::lifecycle",
            wait_ms = u64::try_from(self.wait.duration().as_millis()).unwrap_or(u64::MAX),
            "observation window started"
        );
        self.wait.elapse().await;

        let uninstall_result = self.collaborators.uninstaller.uninstall().await;
        let uninstall = self.report(StageOutcome::from_result(
            Stage::Uninstall,
            &uninstall_result,
        ));

        RunReport::completed(install, uninstall)
    }

    fn report(&self, outcome: StageOutcome) -> StageOutcome {
        if outcome.succeeded() {
            info!(
                target: "warden::lifecycle",
                stage = %outcome.stage(),
                detail = outcome.detail(),
                "stage finished"
            );
        } else {
            warn!(
                target: "warden::lifecycle",
                stage = %outcome.stage(),
                detail = outcome.detail(),
                "stage did not succeed"
            );
        }
        self.collaborators.notifier.present(outcome.detail());
        outcome
    }

    fn acknowledge(&mut self) {
        if let Err(error) = self.collaborators.input.acknowledge() {
            warn!(target: "warden::lifecycle", %error, "failed to read acknowledgement");
        }
    }
}
