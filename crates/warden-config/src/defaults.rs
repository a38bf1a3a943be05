//! Fallback values for every configuration field.

use crate::backend::ManagerBackend;
use crate::logging::LogFormat;

/// Service name registered with the service database by default.
pub const DEFAULT_SERVICE_NAME: &str = "WardenProbe";

/// Display name shown by service management consoles by default.
pub const DEFAULT_DISPLAY_NAME: &str = "Warden Probe Service";

/// Service control tool invoked by the `sc` backend.
pub const DEFAULT_SC_PROGRAM: &str = "sc.exe";

/// Observation window between install and uninstall.
pub const DEFAULT_WAIT_MS: u64 = 10_000;

/// Interval between service status probes while waiting for a state change.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 250;

/// Upper bound for a service to report `STOPPED` after a stop request.
pub const DEFAULT_STOP_TIMEOUT_MS: u64 = 30_000;

/// Upper bound for the service database to drop a deleted service.
pub const DEFAULT_REMOVAL_TIMEOUT_MS: u64 = 30_000;

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default log filter expression used by the binary.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    String::from(DEFAULT_LOG_FILTER)
}

/// Default logging format for the binary.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Owned default service name.
#[must_use]
pub fn default_service_name() -> String {
    String::from(DEFAULT_SERVICE_NAME)
}

/// Owned default display name.
#[must_use]
pub fn default_display_name() -> String {
    String::from(DEFAULT_DISPLAY_NAME)
}

/// Owned default service control program.
#[must_use]
pub fn default_sc_program() -> String {
    String::from(DEFAULT_SC_PROGRAM)
}

/// Backend used when none is configured.
///
/// Only Windows hosts carry a service control manager, so every other
/// platform falls back to the in-process database.
#[must_use]
pub const fn default_backend() -> ManagerBackend {
    if cfg!(windows) {
        ManagerBackend::Sc
    } else {
        ManagerBackend::Memory
    }
}
