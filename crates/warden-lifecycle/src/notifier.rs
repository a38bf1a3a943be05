//! One-way channel for operator-facing status lines.

use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::warn;

/// Presents status strings to the operator.
///
/// Delivery is fire-and-forget: implementations never report failure back to
/// the caller.
pub trait Notifier {
    /// Shows one message.
    fn present(&self, message: &str);
}

impl<T> Notifier for Arc<T>
where
    T: Notifier + ?Sized,
{
    fn present(&self, message: &str) {
        (**self).present(message);
    }
}

/// Writes each message as one line to the wrapped writer.
#[derive(Debug)]
pub struct ConsoleNotifier<W> {
    writer: Mutex<W>,
}

impl<W> ConsoleNotifier<W>
where
    W: Write,
{
    /// Wraps `writer`.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W> Notifier for ConsoleNotifier<W>
where
    W: Write,
{
    fn present(&self, message: &str) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(error) = writeln!(writer, "{message}").and_then(|()| writer.flush()) {
            warn!(target: "warden::notifier", %error, "failed to present notification");
        }
    }
}
