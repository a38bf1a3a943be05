//! The observation window held between install and uninstall.

use std::time::Duration;

use warden_config::Config;

/// Fixed interval the orchestrator suspends for before uninstalling.
///
/// The wait runs on the tokio timer, so the hosting runtime keeps servicing
/// other tasks while the window elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitSpec {
    duration: Duration,
}

impl WaitSpec {
    /// Window used when nothing else is configured.
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(10_000);

    /// Builds a wait of the given length.
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self { duration }
    }

    /// Builds a wait from a millisecond count.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// Reads the configured observation window.
    #[must_use]
    pub const fn from_config(config: &Config) -> Self {
        Self::new(config.wait())
    }

    /// Length of the window.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Whole seconds in the window, truncating any sub-second remainder.
    #[must_use]
    pub const fn seconds(&self) -> u64 {
        self.duration.as_secs()
    }

    /// Operator notice announcing the upcoming wait.
    #[must_use]
    pub fn notice(&self) -> String {
        format!(
            "The service will wait for {} seconds before proceeding to uninstall.",
            self.seconds()
        )
    }

    /// Suspends the current task until the window has fully elapsed.
    pub async fn elapse(&self) {
        tokio::time::sleep(self.duration).await;
    }
}

impl Default for WaitSpec {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DURATION)
    }
}
