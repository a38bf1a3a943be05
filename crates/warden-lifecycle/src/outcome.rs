//! Stage outcomes and the per-run report.
//!
//! The `detail` strings built here are the operator-facing contract: tooling
//! layered on top of the orchestrator matches them verbatim, so the templates
//! and the `True`/`False` spelling must not drift.

use std::fmt;

use crate::decision::LifecycleDecision;
use crate::primitives::ServiceError;

/// Service stages that produce an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Registering and starting the service.
    Install,
    /// Stopping and removing the service.
    Uninstall,
}

impl Stage {
    const fn noun(self) -> &'static str {
        match self {
            Self::Install => "installation",
            Self::Uninstall => "uninstallation",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Install => formatter.write_str("install"),
            Self::Uninstall => formatter.write_str("uninstall"),
        }
    }
}

/// Result of one stage, ready to be shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageOutcome {
    stage: Stage,
    succeeded: bool,
    detail: String,
}

impl StageOutcome {
    /// Wraps a primitive's result.
    ///
    /// `Ok(flag)` reports the primitive's own success flag; `Err` always
    /// yields `succeeded == false` with the failure text carried verbatim.
    #[must_use]
    pub fn from_result(stage: Stage, result: &Result<bool, ServiceError>) -> Self {
        match result {
            Ok(flag) => Self {
                stage,
                succeeded: *flag,
                detail: format!("Service {} success: {}", stage.noun(), flag_text(*flag)),
            },
            Err(error) => Self {
                stage,
                succeeded: false,
                detail: format!("Service {} failed: {error}", stage.noun()),
            },
        }
    }

    /// Stage this outcome belongs to.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// Whether the stage reported success.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        self.succeeded
    }

    /// Operator-facing summary.
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

const fn flag_text(flag: bool) -> &'static str {
    if flag { "True" } else { "False" }
}

/// Everything observed during one orchestrator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    decision: LifecycleDecision,
    install: Option<StageOutcome>,
    uninstall: Option<StageOutcome>,
}

impl RunReport {
    pub(crate) const fn aborted() -> Self {
        Self {
            decision: LifecycleDecision::Abort,
            install: None,
            uninstall: None,
        }
    }

    pub(crate) const fn completed(install: StageOutcome, uninstall: StageOutcome) -> Self {
        Self {
            decision: LifecycleDecision::Proceed,
            install: Some(install),
            uninstall: Some(uninstall),
        }
    }

    /// Decision returned by the confirmation gate.
    #[must_use]
    pub const fn decision(&self) -> LifecycleDecision {
        self.decision
    }

    /// Install outcome, absent when the run was aborted.
    #[must_use]
    pub const fn install(&self) -> Option<&StageOutcome> {
        self.install.as_ref()
    }

    /// Uninstall outcome, absent when the run was aborted.
    #[must_use]
    pub const fn uninstall(&self) -> Option<&StageOutcome> {
        self.uninstall.as_ref()
    }

    /// True when no attempted stage failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        [self.install.as_ref(), self.uninstall.as_ref()]
            .into_iter()
            .flatten()
            .all(StageOutcome::succeeded)
    }
}
