//! Console-backed collaborators sharing one input and one output stream.
//!
//! The confirmation prompt, the notifications, and the final acknowledgement
//! all talk to the same terminal. Each adapter borrows the shared stream only
//! for the duration of a single call.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};

use warden_lifecycle::{
    ConfirmationGate, GateError, InputReader, LifecycleDecision, LineInputReader, PromptGate,
};

/// Writer handle over a stream shared with other console adapters.
pub(crate) struct SharedWriter<'a, W> {
    inner: &'a RefCell<W>,
}

impl<'a, W> SharedWriter<'a, W> {
    pub(crate) const fn new(inner: &'a RefCell<W>) -> Self {
        Self { inner }
    }
}

impl<W> Write for SharedWriter<'_, W>
where
    W: Write,
{
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.borrow_mut().flush()
    }
}

/// `[y/N]` prompt over the shared console.
pub(crate) struct ConsoleGate<'a, R, W> {
    reader: &'a RefCell<R>,
    writer: SharedWriter<'a, W>,
    service: String,
}

impl<'a, R, W> ConsoleGate<'a, R, W> {
    pub(crate) fn new(reader: &'a RefCell<R>, writer: &'a RefCell<W>, service: &str) -> Self {
        Self {
            reader,
            writer: SharedWriter::new(writer),
            service: service.to_owned(),
        }
    }
}

impl<R, W> ConfirmationGate for ConsoleGate<'_, R, W>
where
    R: BufRead,
    W: Write,
{
    fn decide(&mut self) -> Result<LifecycleDecision, GateError> {
        let mut reader = self.reader.borrow_mut();
        PromptGate::for_service(&mut *reader, &mut self.writer, &self.service).decide()
    }
}

/// Waits for one line on the shared console.
pub(crate) struct ConsoleAcknowledgement<'a, R> {
    reader: &'a RefCell<R>,
}

impl<'a, R> ConsoleAcknowledgement<'a, R> {
    pub(crate) const fn new(reader: &'a RefCell<R>) -> Self {
        Self { reader }
    }
}

impl<R> InputReader for ConsoleAcknowledgement<'_, R>
where
    R: BufRead,
{
    fn acknowledge(&mut self) -> io::Result<()> {
        let mut reader = self.reader.borrow_mut();
        LineInputReader::new(&mut *reader).acknowledge()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn gate_and_acknowledgement_share_one_input() {
        let input = RefCell::new(Cursor::new("yes\nanything\nleftover\n"));
        let output = RefCell::new(Vec::new());
        let mut gate = ConsoleGate::new(&input, &output, "Probe");
        let mut acknowledgement = ConsoleAcknowledgement::new(&input);

        assert_eq!(gate.decide().expect("gate decides"), LifecycleDecision::Proceed);
        acknowledgement.acknowledge().expect("acknowledged");
        drop(gate);
        drop(acknowledgement);

        let remaining = input.into_inner();
        let position = usize::try_from(remaining.position()).expect("position fits");
        assert_eq!(remaining.get_ref().get(position..), Some("leftover\n"));
    }

    #[test]
    fn prompt_is_written_to_the_shared_output() {
        let input = RefCell::new(Cursor::new("n\n"));
        let output = RefCell::new(Vec::new());
        let mut gate = ConsoleGate::new(&input, &output, "Probe");

        assert_eq!(gate.decide().expect("gate decides"), LifecycleDecision::Abort);
        drop(gate);

        let written = String::from_utf8(output.into_inner()).expect("prompt utf8");
        assert!(written.ends_with("[y/N] "), "unexpected prompt: {written}");
    }
}
