//! Shared configuration for the Warden service lifecycle tooling.
//!
//! [`Config`] is resolved from three layers with increasing precedence: a
//! configuration file (discovered or passed via `--config-path`), `WARDEN_*`
//! environment variables, and command-line flags. The resolved values describe
//! which service to manage, which service database backs the primitives, how
//! long the observation window lasts, and how telemetry is rendered.

mod backend;
mod defaults;
mod logging;

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use backend::{ManagerBackend, ManagerBackendParseError};
pub use defaults::{
    DEFAULT_DISPLAY_NAME, DEFAULT_LOG_FILTER, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_REMOVAL_TIMEOUT_MS, DEFAULT_SC_PROGRAM, DEFAULT_SERVICE_NAME,
    DEFAULT_STOP_TIMEOUT_MS, DEFAULT_WAIT_MS, default_backend, default_display_name,
    default_log_filter, default_log_filter_string, default_log_format, default_sc_program,
    default_service_name,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved configuration shared by the CLI and the lifecycle core.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "WARDEN")]
pub struct Config {
    /// Name the service is registered under in the service database.
    #[ortho_config(default = default_service_name())]
    pub service_name: String,
    /// Friendly name displayed by service management consoles.
    #[ortho_config(default = default_display_name())]
    pub display_name: String,
    /// Executable registered as the service binary.
    pub binary_path: Option<Utf8PathBuf>,
    /// Service database implementation.
    #[ortho_config(default = default_backend())]
    pub backend: ManagerBackend,
    /// Service control tool invoked by the `sc` backend.
    #[ortho_config(default = default_sc_program())]
    pub sc_program: String,
    /// Observation window between install and uninstall, in milliseconds.
    #[ortho_config(default = DEFAULT_WAIT_MS)]
    pub wait_ms: u64,
    /// Delay between status probes while waiting for state changes.
    #[ortho_config(default = DEFAULT_POLL_INTERVAL_MS)]
    pub poll_interval_ms: u64,
    /// Upper bound for a stop request to settle.
    #[ortho_config(default = DEFAULT_STOP_TIMEOUT_MS)]
    pub stop_timeout_ms: u64,
    /// Upper bound for the service database to forget a deleted service.
    #[ortho_config(default = DEFAULT_REMOVAL_TIMEOUT_MS)]
    pub removal_timeout_ms: u64,
    /// Tracing filter expression (`RUST_LOG` syntax).
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Rendering of tracing events.
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            display_name: default_display_name(),
            binary_path: None,
            backend: default_backend(),
            sc_program: default_sc_program(),
            wait_ms: DEFAULT_WAIT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            stop_timeout_ms: DEFAULT_STOP_TIMEOUT_MS,
            removal_timeout_ms: DEFAULT_REMOVAL_TIMEOUT_MS,
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Name the service is registered under.
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Friendly name displayed by service consoles.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Executable registered as the service binary, when configured.
    #[must_use]
    pub fn binary_path(&self) -> Option<&Utf8Path> {
        self.binary_path.as_deref()
    }

    /// Service database implementation.
    #[must_use]
    pub const fn backend(&self) -> ManagerBackend {
        self.backend
    }

    /// Service control tool invoked by the `sc` backend.
    #[must_use]
    pub fn sc_program(&self) -> &str {
        &self.sc_program
    }

    /// Observation window between install and uninstall.
    #[must_use]
    pub const fn wait(&self) -> Duration {
        Duration::from_millis(self.wait_ms)
    }

    /// Delay between status probes.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Upper bound for a stop request to settle.
    #[must_use]
    pub const fn stop_timeout(&self) -> Duration {
        Duration::from_millis(self.stop_timeout_ms)
    }

    /// Upper bound for a deleted service to disappear.
    #[must_use]
    pub const fn removal_timeout(&self) -> Duration {
        Duration::from_millis(self.removal_timeout_ms)
    }

    /// Tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Rendering of tracing events.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }
}
