//! Composite uninstall: stop, mark for deletion, and wait for removal.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task;
use tokio::time::{Instant, sleep};
use tracing::{debug, info, warn};
use warden_config::{
    Config, DEFAULT_POLL_INTERVAL_MS, DEFAULT_REMOVAL_TIMEOUT_MS, DEFAULT_STOP_TIMEOUT_MS,
};

use super::{ServiceError, ServiceManager, ServiceOperation, ServiceStatus};
use crate::classifier::codes;

/// Stops and removes the managed service.
///
/// `Ok(true)` means the service database no longer lists the service.
/// `Ok(false)` means the requests were accepted but the entry was still
/// present when the removal window closed, or there was nothing to remove.
#[async_trait]
pub trait Uninstaller: Send + Sync {
    /// Performs the uninstallation.
    ///
    /// # Errors
    ///
    /// Returns primitive failures other than the benign "not active" and
    /// "already marked" codes, and [`ServiceError::Timeout`] when the
    /// service does not stop in time.
    async fn uninstall(&self) -> Result<bool, ServiceError>;
}

/// Timing bounds for the uninstall polling loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UninstallPolicy {
    /// Delay between status checks.
    pub poll_interval: Duration,
    /// Bound on waiting for the service to report `STOPPED`.
    pub stop_timeout: Duration,
    /// Bound on waiting for the entry to disappear.
    pub removal_timeout: Duration,
}

impl UninstallPolicy {
    /// Reads the polling bounds from configuration.
    #[must_use]
    pub const fn from_config(config: &Config) -> Self {
        Self {
            poll_interval: config.poll_interval(),
            stop_timeout: config.stop_timeout(),
            removal_timeout: config.removal_timeout(),
        }
    }
}

impl Default for UninstallPolicy {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            stop_timeout: Duration::from_millis(DEFAULT_STOP_TIMEOUT_MS),
            removal_timeout: Duration::from_millis(DEFAULT_REMOVAL_TIMEOUT_MS),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Observation {
    Present(ServiceStatus),
    Gone,
}

/// [`Uninstaller`] built on a [`ServiceManager`].
#[derive(Clone)]
pub struct ServiceUninstaller {
    manager: Arc<dyn ServiceManager>,
    name: String,
    policy: UninstallPolicy,
}

impl ServiceUninstaller {
    /// Builds an uninstaller for the named service.
    #[must_use]
    pub fn new(
        manager: Arc<dyn ServiceManager>,
        name: impl Into<String>,
        policy: UninstallPolicy,
    ) -> Self {
        Self {
            manager,
            name: name.into(),
            policy,
        }
    }

    /// Runs a blocking primitive on the runtime's blocking pool.
    async fn call<T, F>(&self, operation: ServiceOperation, request: F) -> Result<T, ServiceError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn ServiceManager, &str) -> Result<T, ServiceError> + Send + 'static,
    {
        let manager = Arc::clone(&self.manager);
        let name = self.name.clone();
        task::spawn_blocking(move || request(&*manager, &name))
            .await
            .map_err(|error| ServiceError::Interrupted {
                operation,
                service: self.name.clone(),
                message: error.to_string(),
            })?
    }

    async fn observe(&self) -> Result<Observation, ServiceError> {
        let queried = self
            .call(ServiceOperation::Query, |manager, name| manager.query_status(name))
            .await;
        match queried {
            Ok(status) => Ok(Observation::Present(status)),
            Err(error) if error.has_code(codes::SERVICE_DOES_NOT_EXIST) => Ok(Observation::Gone),
            Err(error) => Err(error),
        }
    }

    /// Polls until `settled` accepts an observation or `timeout` passes.
    ///
    /// Returns the last observation either way.
    async fn poll_until(
        &self,
        timeout: Duration,
        settled: impl Fn(Observation) -> bool + Send,
    ) -> Result<(Observation, bool), ServiceError> {
        let deadline = Instant::now() + timeout;
        loop {
            let observation = self.observe().await?;
            if settled(observation) {
                return Ok((observation, true));
            }
            if Instant::now() >= deadline {
                return Ok((observation, false));
            }
            sleep(self.policy.poll_interval).await;
        }
    }

    async fn request_stop(&self) -> Result<bool, ServiceError> {
        let stopped = self
            .call(ServiceOperation::Stop, |manager, name| manager.stop(name))
            .await;
        match stopped {
            Ok(()) => Ok(true),
            Err(error) if error.has_code(codes::SERVICE_NOT_ACTIVE) => {
                debug!(target: "warden::uninstall", service = %self.name, "service was not running");
                Ok(true)
            }
            Err(error) if error.has_code(codes::SERVICE_DOES_NOT_EXIST) => Ok(false),
            Err(error) => Err(error),
        }
    }

    async fn request_deletion(&self) -> Result<bool, ServiceError> {
        let marked = self
            .call(ServiceOperation::Delete, |manager, name| {
                manager.mark_for_deletion(name)
            })
            .await;
        match marked {
            Ok(()) => Ok(true),
            Err(error) if error.has_code(codes::SERVICE_MARKED_FOR_DELETE) => {
                debug!(target: "warden::uninstall", service = %self.name, "service already marked");
                Ok(true)
            }
            Err(error) if error.has_code(codes::SERVICE_DOES_NOT_EXIST) => Ok(false),
            Err(error) => Err(error),
        }
    }

    fn timeout_ms(timeout: Duration) -> u64 {
        u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

#[async_trait]
impl Uninstaller for ServiceUninstaller {
    async fn uninstall(&self) -> Result<bool, ServiceError> {
        if !self.request_stop().await? {
            info!(target: "warden::uninstall", service = %self.name, "service not installed");
            return Ok(false);
        }

        let (observation, stopped) = self
            .poll_until(self.policy.stop_timeout, |seen| {
                matches!(seen, Observation::Gone | Observation::Present(ServiceStatus::Stopped))
            })
            .await?;
        if observation == Observation::Gone {
            return Ok(true);
        }
        if !stopped {
            return Err(ServiceError::Timeout {
                operation: ServiceOperation::Stop,
                service: self.name.clone(),
                timeout_ms: Self::timeout_ms(self.policy.stop_timeout),
            });
        }

        if !self.request_deletion().await? {
            return Ok(true);
        }

        let (_, removed) = self
            .poll_until(self.policy.removal_timeout, |seen| seen == Observation::Gone)
            .await?;
        if removed {
            info!(target: "warden::uninstall", service = %self.name, "service removed");
        } else {
            warn!(
                target: "warden::uninstall",
                service = %self.name,
                "service still listed after the removal window"
            );
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use mockall::mock;
    use mockall::predicate::eq;

    use super::*;
    use crate::primitives::{MemoryServiceManager, ServiceSpec};

    mock! {
        pub Manager {}

        impl ServiceManager for Manager {
            fn create(&self, spec: &ServiceSpec) -> Result<(), ServiceError>;
            fn start(&self, name: &str) -> Result<(), ServiceError>;
            fn stop(&self, name: &str) -> Result<(), ServiceError>;
            fn query_status(&self, name: &str) -> Result<ServiceStatus, ServiceError>;
            fn mark_for_deletion(&self, name: &str) -> Result<(), ServiceError>;
        }
    }

    const NAME: &str = "Probe";

    fn policy() -> UninstallPolicy {
        UninstallPolicy {
            poll_interval: Duration::from_millis(100),
            stop_timeout: Duration::from_secs(1),
            removal_timeout: Duration::from_secs(2),
        }
    }

    fn missing(operation: ServiceOperation) -> ServiceError {
        ServiceError::platform(operation, NAME, codes::SERVICE_DOES_NOT_EXIST)
    }

    #[tokio::test(start_paused = true)]
    async fn running_service_is_removed() {
        let manager = Arc::new(MemoryServiceManager::new());
        manager
            .create(&ServiceSpec::new(NAME, "Probe Service"))
            .expect("create succeeds");
        manager.start(NAME).expect("start succeeds");
        let uninstaller = ServiceUninstaller::new(manager.clone(), NAME, policy());

        assert!(uninstaller.uninstall().await.expect("uninstall succeeds"));
        assert!(!manager.is_installed(NAME));
    }

    #[tokio::test(start_paused = true)]
    async fn absent_service_reports_nothing_removed() {
        let manager = Arc::new(MemoryServiceManager::new());
        let uninstaller = ServiceUninstaller::new(manager, NAME, policy());

        assert!(!uninstaller.uninstall().await.expect("uninstall succeeds"));
    }

    #[tokio::test(start_paused = true)]
    async fn stop_failures_propagate() {
        let manager = Arc::new(MemoryServiceManager::new());
        manager
            .create(&ServiceSpec::new(NAME, "Probe Service"))
            .expect("create succeeds");
        manager.start(NAME).expect("start succeeds");
        manager.fail_next(ServiceOperation::Stop, codes::SERVICE_CANNOT_ACCEPT_CTRL);
        let uninstaller = ServiceUninstaller::new(manager, NAME, policy());

        let error = uninstaller.uninstall().await.expect_err("uninstall fails");

        assert!(error.has_code(codes::SERVICE_CANNOT_ACCEPT_CTRL));
    }

    #[tokio::test(start_paused = true)]
    async fn service_stuck_in_stop_pending_times_out() {
        let mut manager = MockManager::new();
        manager.expect_stop().with(eq(NAME)).returning(|_| Ok(()));
        manager
            .expect_query_status()
            .returning(|_| Ok(ServiceStatus::StopPending));
        manager.expect_mark_for_deletion().never();
        let uninstaller = ServiceUninstaller::new(Arc::new(manager), NAME, policy());
        let started = Instant::now();

        let error = uninstaller.uninstall().await.expect_err("uninstall times out");

        assert!(matches!(
            error,
            ServiceError::Timeout {
                operation: ServiceOperation::Stop,
                timeout_ms: 1_000,
                ..
            }
        ));
        assert!(started.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn lingering_entry_reports_false_after_removal_window() {
        let mut manager = MockManager::new();
        manager.expect_stop().returning(|_| Ok(()));
        manager
            .expect_query_status()
            .returning(|_| Ok(ServiceStatus::Stopped));
        manager.expect_mark_for_deletion().times(1).returning(|_| Ok(()));
        let uninstaller = ServiceUninstaller::new(Arc::new(manager), NAME, policy());
        let started = Instant::now();

        assert!(!uninstaller.uninstall().await.expect("uninstall completes"));
        assert!(started.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn entry_disappearing_during_polling_counts_as_removed() {
        let polls = Arc::new(Mutex::new(0_u32));
        let counter = Arc::clone(&polls);
        let mut manager = MockManager::new();
        manager.expect_stop().returning(|_| Ok(()));
        manager.expect_query_status().returning(move |_| {
            let mut seen = counter.lock().expect("counter lock");
            *seen += 1;
            match *seen {
                1 => Ok(ServiceStatus::StopPending),
                2 | 3 => Ok(ServiceStatus::Stopped),
                _ => Err(missing(ServiceOperation::Query)),
            }
        });
        manager.expect_mark_for_deletion().returning(|_| Ok(()));
        let uninstaller = ServiceUninstaller::new(Arc::new(manager), NAME, policy());

        assert!(uninstaller.uninstall().await.expect("uninstall succeeds"));
        assert_eq!(*polls.lock().expect("counter lock"), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn primitives_run_off_the_runtime_thread() {
        let runtime_thread = std::thread::current().id();
        let threads = Arc::new(Mutex::new(Vec::new()));
        let mut manager = MockManager::new();
        let seen = Arc::clone(&threads);
        manager.expect_stop().returning(move |_| {
            seen.lock().expect("thread log").push(std::thread::current().id());
            Ok(())
        });
        let seen = Arc::clone(&threads);
        let mut queries = 0_u32;
        manager.expect_query_status().returning(move |_| {
            seen.lock().expect("thread log").push(std::thread::current().id());
            queries += 1;
            if queries == 1 {
                Ok(ServiceStatus::Stopped)
            } else {
                Err(missing(ServiceOperation::Query))
            }
        });
        let seen = Arc::clone(&threads);
        manager.expect_mark_for_deletion().returning(move |_| {
            seen.lock().expect("thread log").push(std::thread::current().id());
            Ok(())
        });
        let uninstaller = ServiceUninstaller::new(Arc::new(manager), NAME, policy());

        assert!(uninstaller.uninstall().await.expect("uninstall succeeds"));

        let threads = threads.lock().expect("thread log");
        assert_eq!(threads.len(), 4);
        assert!(threads.iter().all(|thread| *thread != runtime_thread));
    }

    #[tokio::test(start_paused = true)]
    async fn already_marked_service_is_tolerated() {
        let mut manager = MockManager::new();
        manager.expect_stop().returning(|_| {
            Err(ServiceError::platform(
                ServiceOperation::Stop,
                NAME,
                codes::SERVICE_NOT_ACTIVE,
            ))
        });
        let queries = Arc::new(Mutex::new(0_u32));
        let counter = Arc::clone(&queries);
        manager.expect_query_status().returning(move |_| {
            let mut seen = counter.lock().expect("counter lock");
            *seen += 1;
            if *seen == 1 {
                Ok(ServiceStatus::Stopped)
            } else {
                Err(missing(ServiceOperation::Query))
            }
        });
        manager.expect_mark_for_deletion().returning(|_| {
            Err(ServiceError::platform(
                ServiceOperation::Delete,
                NAME,
                codes::SERVICE_MARKED_FOR_DELETE,
            ))
        });
        let uninstaller = ServiceUninstaller::new(Arc::new(manager), NAME, policy());

        assert!(uninstaller.uninstall().await.expect("uninstall succeeds"));
    }
}
