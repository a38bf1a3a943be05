//! Output format for the diagnostic log stream on stderr.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How log events are rendered.
///
/// Parsed case-insensitively from `json` or `compact`.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One JSON object per event.
    Json,
    /// Terse text lines for an operator watching the console.
    #[default]
    Compact,
}

/// Error returned when a log format name is not recognised.
pub type LogFormatParseError = strum::ParseError;
