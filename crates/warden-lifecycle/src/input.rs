//! Final acknowledgement that keeps the console open.

use std::io::{self, BufRead};

/// Blocks until the operator acknowledges the end of a run.
pub trait InputReader {
    /// Waits for acknowledgement.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when input cannot be read.
    fn acknowledge(&mut self) -> io::Result<()>;
}

/// Reads and discards one line.
#[derive(Debug)]
pub struct LineInputReader<R> {
    reader: R,
}

impl<R> LineInputReader<R>
where
    R: BufRead,
{
    /// Wraps `reader`.
    #[must_use]
    pub const fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R> InputReader for LineInputReader<R>
where
    R: BufRead,
{
    fn acknowledge(&mut self) -> io::Result<()> {
        let mut line = String::new();
        self.reader.read_line(&mut line).map(drop)
    }
}

/// Returns immediately; used for unattended runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPauseInput;

impl InputReader for NoPauseInput {
    fn acknowledge(&mut self) -> io::Result<()> {
        Ok(())
    }
}
