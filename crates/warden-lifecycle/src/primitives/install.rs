//! Composite install: register, start, and confirm the service is up.

use std::sync::Arc;

use tracing::{debug, info};

use super::{ServiceError, ServiceManager, ServiceSpec};
use crate::classifier::codes;

/// Registers and starts the managed service.
///
/// `Ok(true)` means the service is running (or starting) once the call
/// returns; `Ok(false)` means every request was accepted but the service did
/// not come up.
pub trait Installer: Send + Sync {
    /// Performs the installation.
    ///
    /// # Errors
    ///
    /// Returns the first primitive failure encountered.
    fn install(&self) -> Result<bool, ServiceError>;
}

/// [`Installer`] built on a [`ServiceManager`].
#[derive(Clone)]
pub struct ServiceInstaller {
    manager: Arc<dyn ServiceManager>,
    spec: ServiceSpec,
}

impl ServiceInstaller {
    /// Builds an installer for `spec` using `manager`.
    #[must_use]
    pub fn new(manager: Arc<dyn ServiceManager>, spec: ServiceSpec) -> Self {
        Self { manager, spec }
    }
}

impl Installer for ServiceInstaller {
    fn install(&self) -> Result<bool, ServiceError> {
        let name = self.spec.name();
        self.manager.create(&self.spec)?;
        debug!(target: "warden::install", service = name, "service registered");
        match self.manager.start(name) {
            Ok(()) => {}
            Err(error) if error.has_code(codes::SERVICE_ALREADY_RUNNING) => {
                debug!(target: "warden::install", service = name, "service already running");
            }
            Err(error) => return Err(error),
        }
        let status = self.manager.query_status(name)?;
        info!(target: "warden::install", service = name, %status, "install settled");
        Ok(status.is_active())
    }
}
