//! Operator confirmation preceding the timed workflow.

use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::decision::LifecycleDecision;

/// Failures raised while asking the operator for confirmation.
#[derive(Debug, Error)]
pub enum GateError {
    /// The prompt could not be written.
    #[error("failed to write confirmation prompt: {0}")]
    Prompt(#[source] io::Error),
    /// The operator's answer could not be read.
    #[error("failed to read confirmation answer: {0}")]
    Read(#[source] io::Error),
}

/// Produces the one-time decision that starts (or skips) a run.
pub trait ConfirmationGate {
    /// Asks for the decision.
    ///
    /// # Errors
    ///
    /// Returns [`GateError`] when the operator cannot be reached.
    fn decide(&mut self) -> Result<LifecycleDecision, GateError>;
}

/// Gate that always proceeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYesGate;

impl ConfirmationGate for AssumeYesGate {
    fn decide(&mut self) -> Result<LifecycleDecision, GateError> {
        Ok(LifecycleDecision::Proceed)
    }
}

/// Gate that prints a `[y/N]` prompt and reads one line.
///
/// `y` and `yes` (any case) proceed; anything else, including end of input,
/// aborts.
#[derive(Debug)]
pub struct PromptGate<R, W> {
    reader: R,
    writer: W,
    prompt: String,
}

impl<R, W> PromptGate<R, W>
where
    R: BufRead,
    W: Write,
{
    /// Builds a gate with a custom prompt.
    #[must_use]
    pub fn new(reader: R, writer: W, prompt: impl Into<String>) -> Self {
        Self {
            reader,
            writer,
            prompt: prompt.into(),
        }
    }

    /// Builds a gate asking about the named service.
    #[must_use]
    pub fn for_service(reader: R, writer: W, service: &str) -> Self {
        Self::new(
            reader,
            writer,
            format!("Install service '{service}', observe it, then uninstall it?"),
        )
    }
}

impl<R, W> ConfirmationGate for PromptGate<R, W>
where
    R: BufRead,
    W: Write,
{
    fn decide(&mut self) -> Result<LifecycleDecision, GateError> {
        write!(self.writer, "{} [y/N] ", self.prompt).map_err(GateError::Prompt)?;
        self.writer.flush().map_err(GateError::Prompt)?;

        let mut answer = String::new();
        let read = self
            .reader
            .read_line(&mut answer)
            .map_err(GateError::Read)?;
        if read == 0 {
            return Ok(LifecycleDecision::Abort);
        }
        let confirmed = matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes");
        Ok(LifecycleDecision::from_confirmation(confirmed))
    }
}
