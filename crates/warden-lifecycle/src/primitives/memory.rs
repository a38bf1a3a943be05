//! In-process service database used for dry runs and tests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{ServiceError, ServiceManager, ServiceOperation, ServiceSpec, ServiceStatus};
use crate::classifier::codes;

#[derive(Debug)]
struct Entry {
    status: ServiceStatus,
    marked_for_deletion: bool,
}

#[derive(Debug, Default)]
struct Database {
    services: HashMap<String, Entry>,
    injected: HashMap<ServiceOperation, i32>,
}

impl Database {
    fn take_injected(&mut self, operation: ServiceOperation, name: &str) -> Result<(), ServiceError> {
        self.injected
            .remove(&operation)
            .map_or(Ok(()), |code| Err(ServiceError::platform(operation, name, code)))
    }

    fn entry_mut(
        &mut self,
        operation: ServiceOperation,
        name: &str,
    ) -> Result<&mut Entry, ServiceError> {
        self.services.get_mut(name).ok_or_else(|| {
            ServiceError::platform(operation, name, codes::SERVICE_DOES_NOT_EXIST)
        })
    }
}

/// [`ServiceManager`] that keeps its service database in memory.
///
/// State transitions settle immediately. A service marked for deletion
/// disappears as soon as it is stopped, mirroring how the platform drops an
/// entry once its last handle closes.
#[derive(Debug, Default)]
pub struct MemoryServiceManager {
    database: Mutex<Database>,
}

impl MemoryServiceManager {
    /// Creates an empty database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `operation` fail with the given platform code.
    pub fn fail_next(&self, operation: ServiceOperation, raw_code: i32) {
        self.lock().injected.insert(operation, raw_code);
    }

    /// True while the named service has an entry in the database.
    #[must_use]
    pub fn is_installed(&self, name: &str) -> bool {
        self.lock().services.contains_key(name)
    }

    fn lock(&self) -> MutexGuard<'_, Database> {
        self.database.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ServiceManager for MemoryServiceManager {
    fn create(&self, spec: &ServiceSpec) -> Result<(), ServiceError> {
        let mut database = self.lock();
        database.take_injected(ServiceOperation::Create, spec.name())?;
        if let Some(entry) = database.services.get(spec.name()) {
            let code = if entry.marked_for_deletion {
                codes::SERVICE_MARKED_FOR_DELETE
            } else {
                codes::SERVICE_EXISTS
            };
            return Err(ServiceError::platform(ServiceOperation::Create, spec.name(), code));
        }
        database.services.insert(
            spec.name().to_owned(),
            Entry {
                status: ServiceStatus::Stopped,
                marked_for_deletion: false,
            },
        );
        Ok(())
    }

    fn start(&self, name: &str) -> Result<(), ServiceError> {
        let mut database = self.lock();
        database.take_injected(ServiceOperation::Start, name)?;
        let entry = database.entry_mut(ServiceOperation::Start, name)?;
        let code = if entry.marked_for_deletion {
            Some(codes::SERVICE_MARKED_FOR_DELETE)
        } else if entry.status.is_active() {
            Some(codes::SERVICE_ALREADY_RUNNING)
        } else {
            None
        };
        if let Some(raw_code) = code {
            return Err(ServiceError::platform(ServiceOperation::Start, name, raw_code));
        }
        entry.status = ServiceStatus::Running;
        Ok(())
    }

    fn stop(&self, name: &str) -> Result<(), ServiceError> {
        let mut database = self.lock();
        database.take_injected(ServiceOperation::Stop, name)?;
        let entry = database.entry_mut(ServiceOperation::Stop, name)?;
        if entry.status == ServiceStatus::Stopped {
            return Err(ServiceError::platform(
                ServiceOperation::Stop,
                name,
                codes::SERVICE_NOT_ACTIVE,
            ));
        }
        entry.status = ServiceStatus::Stopped;
        if entry.marked_for_deletion {
            database.services.remove(name);
        }
        Ok(())
    }

    fn query_status(&self, name: &str) -> Result<ServiceStatus, ServiceError> {
        let mut database = self.lock();
        database.take_injected(ServiceOperation::Query, name)?;
        database
            .entry_mut(ServiceOperation::Query, name)
            .map(|entry| entry.status)
    }

    fn mark_for_deletion(&self, name: &str) -> Result<(), ServiceError> {
        let mut database = self.lock();
        database.take_injected(ServiceOperation::Delete, name)?;
        let entry = database.entry_mut(ServiceOperation::Delete, name)?;
        if entry.marked_for_deletion {
            return Err(ServiceError::platform(
                ServiceOperation::Delete,
                name,
                codes::SERVICE_MARKED_FOR_DELETE,
            ));
        }
        entry.marked_for_deletion = true;
        if entry.status == ServiceStatus::Stopped {
            database.services.remove(name);
        }
        Ok(())
    }
}
