//! Narrow service-database primitives and the composite install/uninstall
//! operations built on top of them.
//!
//! - [`ServiceManager`] exposes the single-purpose primitives: create, start,
//!   stop, status-check, and mark-for-deletion.
//! - [`ScServiceManager`] drives the Windows service control manager through
//!   `sc.exe`; [`MemoryServiceManager`] keeps an in-process database.
//! - [`ServiceInstaller`] and [`ServiceUninstaller`] compose the primitives
//!   into the two stages the orchestrator drives.

mod error;
mod install;
mod memory;
mod sc;
mod uninstall;

use std::fmt;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use warden_config::{Config, ManagerBackend};

pub use error::ServiceError;
pub use install::{Installer, ServiceInstaller};
pub use memory::MemoryServiceManager;
pub use sc::{CommandOutput, CommandRunner, ScServiceManager, SystemCommandRunner};
pub use uninstall::{ServiceUninstaller, UninstallPolicy, Uninstaller};

/// Primitive requests issued against the service database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceOperation {
    /// Register a new service entry.
    Create,
    /// Start a registered service.
    Start,
    /// Send the stop control.
    Stop,
    /// Read the current status.
    Query,
    /// Mark the entry for deletion.
    Delete,
}

impl fmt::Display for ServiceOperation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Create => "create",
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Query => "query",
            Self::Delete => "delete",
        };
        formatter.write_str(text)
    }
}

/// Current state of a registered service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceStatus {
    /// Not running.
    Stopped,
    /// Start requested, not yet running.
    StartPending,
    /// Stop requested, not yet stopped.
    StopPending,
    /// Running.
    Running,
    /// Continue requested after a pause.
    ContinuePending,
    /// Pause requested.
    PausePending,
    /// Paused.
    Paused,
}

impl ServiceStatus {
    /// Maps the numeric `dwCurrentState` value used by the service database.
    #[must_use]
    pub const fn from_state_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::Stopped),
            2 => Some(Self::StartPending),
            3 => Some(Self::StopPending),
            4 => Some(Self::Running),
            5 => Some(Self::ContinuePending),
            6 => Some(Self::PausePending),
            7 => Some(Self::Paused),
            _ => None,
        }
    }

    /// True when the service is running or on its way there.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Running | Self::StartPending)
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Stopped => "STOPPED",
            Self::StartPending => "START_PENDING",
            Self::StopPending => "STOP_PENDING",
            Self::Running => "RUNNING",
            Self::ContinuePending => "CONTINUE_PENDING",
            Self::PausePending => "PAUSE_PENDING",
            Self::Paused => "PAUSED",
        };
        formatter.write_str(text)
    }
}

/// Registration details for the managed service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSpec {
    name: String,
    display_name: String,
    binary_path: Option<Utf8PathBuf>,
}

impl ServiceSpec {
    /// Builds a spec for the named service.
    #[must_use]
    pub fn new(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            binary_path: None,
        }
    }

    /// Sets the executable registered for the service.
    #[must_use]
    pub fn with_binary_path(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.binary_path = Some(path.into());
        self
    }

    /// Reads the service identity from configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            name: config.service_name().to_owned(),
            display_name: config.display_name().to_owned(),
            binary_path: config.binary_path().map(Utf8Path::to_path_buf),
        }
    }

    /// Service name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Registered executable, if any.
    #[must_use]
    pub fn binary_path(&self) -> Option<&Utf8Path> {
        self.binary_path.as_deref()
    }
}

/// Single-purpose operations against the platform service database.
///
/// Implementations must be cheap to call repeatedly: the uninstaller polls
/// [`ServiceManager::query_status`] while waiting for state changes.
pub trait ServiceManager: Send + Sync {
    /// Registers a new, demand-start service.
    fn create(&self, spec: &ServiceSpec) -> Result<(), ServiceError>;

    /// Starts a registered service.
    fn start(&self, name: &str) -> Result<(), ServiceError>;

    /// Sends the stop control to a service.
    fn stop(&self, name: &str) -> Result<(), ServiceError>;

    /// Reads the current status of a service.
    fn query_status(&self, name: &str) -> Result<ServiceStatus, ServiceError>;

    /// Marks a service for deletion; the entry disappears once every handle
    /// to it is closed.
    fn mark_for_deletion(&self, name: &str) -> Result<(), ServiceError>;
}

impl<T> ServiceManager for Arc<T>
where
    T: ServiceManager + ?Sized,
{
    fn create(&self, spec: &ServiceSpec) -> Result<(), ServiceError> {
        (**self).create(spec)
    }

    fn start(&self, name: &str) -> Result<(), ServiceError> {
        (**self).start(name)
    }

    fn stop(&self, name: &str) -> Result<(), ServiceError> {
        (**self).stop(name)
    }

    fn query_status(&self, name: &str) -> Result<ServiceStatus, ServiceError> {
        (**self).query_status(name)
    }

    fn mark_for_deletion(&self, name: &str) -> Result<(), ServiceError> {
        (**self).mark_for_deletion(name)
    }
}

/// Builds the service manager selected by configuration.
#[must_use]
pub fn manager_for(config: &Config) -> Arc<dyn ServiceManager> {
    match config.backend() {
        ManagerBackend::Sc => Arc::new(ScServiceManager::new(
            config.sc_program(),
            SystemCommandRunner,
        )),
        ManagerBackend::Memory => Arc::new(MemoryServiceManager::new()),
    }
}
