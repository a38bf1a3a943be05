//! Translation of raw service-control error codes into operator text.
//!
//! The service control manager reports failures as Win32 error codes. The
//! table below covers the codes its create, start, control, query, and delete
//! requests return in practice. Anything else falls back to a generic
//! description that still carries the raw code, so lookups never fail.

use std::fmt;

/// Win32 error codes the lifecycle primitives react to.
pub mod codes {
    /// `ERROR_SUCCESS`.
    pub const SUCCESS: i32 = 0;
    /// `ERROR_ACCESS_DENIED`.
    pub const ACCESS_DENIED: i32 = 5;
    /// `ERROR_SERVICE_REQUEST_TIMEOUT`.
    pub const SERVICE_REQUEST_TIMEOUT: i32 = 1053;
    /// `ERROR_SERVICE_ALREADY_RUNNING`.
    pub const SERVICE_ALREADY_RUNNING: i32 = 1056;
    /// `ERROR_SERVICE_DOES_NOT_EXIST`.
    pub const SERVICE_DOES_NOT_EXIST: i32 = 1060;
    /// `ERROR_SERVICE_CANNOT_ACCEPT_CTRL`.
    pub const SERVICE_CANNOT_ACCEPT_CTRL: i32 = 1061;
    /// `ERROR_SERVICE_NOT_ACTIVE`.
    pub const SERVICE_NOT_ACTIVE: i32 = 1062;
    /// `ERROR_SERVICE_MARKED_FOR_DELETE`.
    pub const SERVICE_MARKED_FOR_DELETE: i32 = 1072;
    /// `ERROR_SERVICE_EXISTS`.
    pub const SERVICE_EXISTS: i32 = 1073;
}

const UNKNOWN_MESSAGE: &str = "Unknown service control error.";

const KNOWN_CODES: &[(i32, &str, &str)] = &[
    (
        codes::SUCCESS,
        "ERROR_SUCCESS",
        "The operation completed successfully.",
    ),
    (
        2,
        "ERROR_FILE_NOT_FOUND",
        "The system cannot find the file specified.",
    ),
    (
        3,
        "ERROR_PATH_NOT_FOUND",
        "The system cannot find the path specified.",
    ),
    (codes::ACCESS_DENIED, "ERROR_ACCESS_DENIED", "Access is denied."),
    (6, "ERROR_INVALID_HANDLE", "The handle is invalid."),
    (87, "ERROR_INVALID_PARAMETER", "The parameter is incorrect."),
    (
        123,
        "ERROR_INVALID_NAME",
        "The filename, directory name, or volume label syntax is incorrect.",
    ),
    (
        1051,
        "ERROR_DEPENDENT_SERVICES_RUNNING",
        "A stop control has been sent to a service that other running services are dependent on.",
    ),
    (
        1052,
        "ERROR_INVALID_SERVICE_CONTROL",
        "The requested control is not valid for this service.",
    ),
    (
        codes::SERVICE_REQUEST_TIMEOUT,
        "ERROR_SERVICE_REQUEST_TIMEOUT",
        "The service did not respond to the start or control request in a timely fashion.",
    ),
    (
        1054,
        "ERROR_SERVICE_NO_THREAD",
        "A thread could not be created for the service.",
    ),
    (
        1055,
        "ERROR_SERVICE_DATABASE_LOCKED",
        "The service database is locked.",
    ),
    (
        codes::SERVICE_ALREADY_RUNNING,
        "ERROR_SERVICE_ALREADY_RUNNING",
        "An instance of the service is already running.",
    ),
    (
        1057,
        "ERROR_INVALID_SERVICE_ACCOUNT",
        "The account name is invalid or does not exist, or the password is invalid for the account name specified.",
    ),
    (
        1058,
        "ERROR_SERVICE_DISABLED",
        "The service cannot be started, either because it is disabled or because it has no enabled devices associated with it.",
    ),
    (
        1059,
        "ERROR_CIRCULAR_DEPENDENCY",
        "Circular service dependency was specified.",
    ),
    (
        codes::SERVICE_DOES_NOT_EXIST,
        "ERROR_SERVICE_DOES_NOT_EXIST",
        "The specified service does not exist as an installed service.",
    ),
    (
        codes::SERVICE_CANNOT_ACCEPT_CTRL,
        "ERROR_SERVICE_CANNOT_ACCEPT_CTRL",
        "The service cannot accept control messages at this time.",
    ),
    (
        codes::SERVICE_NOT_ACTIVE,
        "ERROR_SERVICE_NOT_ACTIVE",
        "The service has not been started.",
    ),
    (
        1068,
        "ERROR_SERVICE_DEPENDENCY_FAIL",
        "The dependency service or group failed to start.",
    ),
    (
        1069,
        "ERROR_SERVICE_LOGON_FAILED",
        "The service did not start due to a logon failure.",
    ),
    (
        codes::SERVICE_MARKED_FOR_DELETE,
        "ERROR_SERVICE_MARKED_FOR_DELETE",
        "The specified service has been marked for deletion.",
    ),
    (
        codes::SERVICE_EXISTS,
        "ERROR_SERVICE_EXISTS",
        "The specified service already exists.",
    ),
    (
        1078,
        "ERROR_DUPLICATE_SERVICE_NAME",
        "The name is already in use as either a service name or a service display name.",
    ),
    (
        1115,
        "ERROR_SHUTDOWN_IN_PROGRESS",
        "A system shutdown is in progress.",
    ),
];

/// A raw platform code paired with its description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    raw_code: i32,
    symbol: Option<&'static str>,
    message: String,
}

impl ErrorRecord {
    /// Raw code reported by the platform.
    #[must_use]
    pub const fn raw_code(&self) -> i32 {
        self.raw_code
    }

    /// Symbolic constant name, when the code is known.
    #[must_use]
    pub const fn symbol(&self) -> Option<&'static str> {
        self.symbol
    }

    /// Human-readable description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// True when the code fell through to the generic description.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        self.symbol.is_none()
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol {
            Some(symbol) => write!(
                formatter,
                "{} ({symbol}, error {})",
                self.message, self.raw_code
            ),
            None => write!(formatter, "{} (error {})", self.message, self.raw_code),
        }
    }
}

/// Looks up a raw code, falling back to a generic record for unknown codes.
#[must_use]
pub fn classify(raw_code: i32) -> ErrorRecord {
    KNOWN_CODES
        .iter()
        .find(|(code, _, _)| *code == raw_code)
        .map_or_else(
            || ErrorRecord {
                raw_code,
                symbol: None,
                message: String::from(UNKNOWN_MESSAGE),
            },
            |(code, symbol, message)| ErrorRecord {
                raw_code: *code,
                symbol: Some(*symbol),
                message: (*message).to_owned(),
            },
        )
}

/// Renders the operator-facing description of a raw code.
#[must_use]
pub fn describe(raw_code: i32) -> String {
    classify(raw_code).to_string()
}
