//! Orchestration of a gated service install, observe, and uninstall cycle.
//!
//! The crate ties a handful of narrow service-database primitives into one
//! fail-safe workflow:
//!
//! 1. A [`ConfirmationGate`] asks the operator whether to proceed.
//! 2. The [`Installer`] registers and starts the service.
//! 3. The [`WaitSpec`] observation window elapses on the async timer.
//! 4. The [`Uninstaller`] stops the service, marks it for deletion, and waits
//!    for the service database to drop it.
//! 5. The [`InputReader`] holds the console open until acknowledged.
//!
//! Every stage outcome is reported through the [`Notifier`] using fixed
//! message templates. A failing stage never aborts the stages after it; only
//! a malfunctioning gate ends a run early.
//!
//! Raw platform error codes are translated into operator-readable text by the
//! [`classifier`] module, and the service-database primitives live in
//! [`primitives`] alongside the `sc.exe` and in-memory backends.

pub mod classifier;
mod decision;
mod gate;
mod input;
mod notifier;
mod orchestrator;
mod outcome;
pub mod primitives;
mod wait;

pub use classifier::{ErrorRecord, classify, describe};
pub use decision::LifecycleDecision;
pub use gate::{AssumeYesGate, ConfirmationGate, GateError, PromptGate};
pub use input::{InputReader, LineInputReader, NoPauseInput};
pub use notifier::{ConsoleNotifier, Notifier};
pub use orchestrator::{Collaborators, LifecycleError, LifecycleOrchestrator};
pub use outcome::{RunReport, Stage, StageOutcome};
pub use primitives::{
    Installer, ServiceError, ServiceManager, ServiceOperation, ServiceSpec, ServiceStatus,
    Uninstaller,
};
pub use wait::WaitSpec;

#[cfg(test)]
mod tests;
