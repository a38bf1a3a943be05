//! Error types surfaced by the CLI runtime.

use std::io;
use std::sync::Arc;

use thiserror::Error;
use warden_lifecycle::{LifecycleError, ServiceError};

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("failed to initialise telemetry: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("failed to start async runtime: {0}")]
    Runtime(io::Error),
    #[error("lifecycle run failed: {0}")]
    Lifecycle(#[from] LifecycleError),
    #[error("failed to query service status: {0}")]
    Status(ServiceError),
    #[error("failed to write command output: {0}")]
    Output(io::Error),
}
