//! Failures reported by service primitives.

use std::io;
use std::sync::Arc;

use thiserror::Error;

use super::ServiceOperation;
use crate::classifier::{ErrorRecord, classify};

/// Errors raised by service-database primitives.
///
/// The `Display` output is what the operator sees after
/// `Service installation failed: ` and its uninstall counterpart.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    /// The service database rejected a request with a platform error code.
    #[error("failed to {operation} service '{service}': {record}")]
    Platform {
        /// Request that failed.
        operation: ServiceOperation,
        /// Service the request targeted.
        service: String,
        /// Classified platform error.
        record: ErrorRecord,
    },
    /// The request failed without a platform code; the message is verbatim.
    #[error("{message}")]
    Rejected {
        /// Failure text reported by the service tooling.
        message: String,
    },
    /// The service control tool could not be launched.
    #[error("failed to launch service control tool '{program}': {source}")]
    Launch {
        /// Program that failed to start.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },
    /// A create request had no executable to register.
    #[error("service '{service}' has no executable configured; set binary_path")]
    MissingBinary {
        /// Service that was being created.
        service: String,
    },
    /// A state change did not settle in time.
    #[error("timed out after {timeout_ms} ms waiting for service '{service}' to {operation}")]
    Timeout {
        /// Operation whose effect was awaited.
        operation: ServiceOperation,
        /// Service being observed.
        service: String,
        /// Configured bound in milliseconds.
        timeout_ms: u64,
    },
    /// The blocking task running a primitive panicked or was cancelled.
    #[error("{operation} request for service '{service}' did not complete: {message}")]
    Interrupted {
        /// Request that was running.
        operation: ServiceOperation,
        /// Service the request targeted.
        service: String,
        /// Join failure reported by the runtime.
        message: String,
    },
}

impl ServiceError {
    /// Builds a platform error, classifying the raw code.
    #[must_use]
    pub fn platform(operation: ServiceOperation, service: impl Into<String>, raw_code: i32) -> Self {
        Self::Platform {
            operation,
            service: service.into(),
            record: classify(raw_code),
        }
    }

    /// Raw platform code, when the failure carried one.
    #[must_use]
    pub const fn raw_code(&self) -> Option<i32> {
        match self {
            Self::Platform { record, .. } => Some(record.raw_code()),
            _ => None,
        }
    }

    /// True when the failure carried the given platform code.
    #[must_use]
    pub fn has_code(&self, code: i32) -> bool {
        self.raw_code() == Some(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::codes;

    #[test]
    fn platform_error_message_names_operation_service_and_description() {
        let error = ServiceError::platform(ServiceOperation::Create, "Probe", codes::ACCESS_DENIED);
        assert_eq!(
            error.to_string(),
            "failed to create service 'Probe': Access is denied. (ERROR_ACCESS_DENIED, error 5)"
        );
        assert!(error.has_code(codes::ACCESS_DENIED));
    }

    #[test]
    fn rejected_error_displays_message_verbatim() {
        let error = ServiceError::Rejected {
            message: String::from("access denied"),
        };
        assert_eq!(error.to_string(), "access denied");
        assert_eq!(error.raw_code(), None);
    }

    #[test]
    fn timeout_error_reports_bound() {
        let error = ServiceError::Timeout {
            operation: ServiceOperation::Stop,
            service: String::from("Probe"),
            timeout_ms: 30_000,
        };
        let message = error.to_string();
        assert!(message.contains("30000 ms"), "unexpected message: {message}");
        assert!(message.contains("to stop"), "unexpected message: {message}");
    }
}
