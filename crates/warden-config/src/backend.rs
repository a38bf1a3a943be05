//! Selection of the service database driven by the lifecycle commands.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Service manager implementation used to execute lifecycle primitives.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, EnumString, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ManagerBackend {
    /// The Windows service control manager, driven through `sc.exe`.
    Sc,
    /// An in-process service database that never touches the host.
    Memory,
}

impl ManagerBackend {
    /// Returns true when the backend only simulates service changes.
    #[must_use]
    pub const fn is_simulated(self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for ManagerBackend {
    fn default() -> Self {
        crate::defaults::default_backend()
    }
}

/// Errors encountered while parsing a [`ManagerBackend`] from text.
pub type ManagerBackendParseError = strum::ParseError;
