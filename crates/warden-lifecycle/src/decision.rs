//! Operator decision captured by the confirmation gate.

use std::fmt;

/// Outcome of the one-time confirmation that precedes the timed workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleDecision {
    /// Install, observe, and uninstall the service.
    Proceed,
    /// Skip every service stage.
    Abort,
}

impl LifecycleDecision {
    /// Maps a yes/no answer onto a decision.
    #[must_use]
    pub const fn from_confirmation(confirmed: bool) -> Self {
        if confirmed { Self::Proceed } else { Self::Abort }
    }

    /// Returns true when the operator chose to proceed.
    #[must_use]
    pub const fn is_proceed(self) -> bool {
        matches!(self, Self::Proceed)
    }
}

impl fmt::Display for LifecycleDecision {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Proceed => formatter.write_str("proceed"),
            Self::Abort => formatter.write_str("abort"),
        }
    }
}
