//! Ephemeral user-facing notification (single slot, last write wins).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Error,
    Info,
    Warning,
}

/// The one process-wide notification slot.
///
/// There is no queue: a new `show` overwrites message and severity and forces
/// visibility; the replaced message is lost.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub visible: bool,
}

impl Notification {
    /// Initial state at process start: nothing to show.
    pub fn hidden() -> Self {
        Self {
            message: String::new(),
            severity: Severity::Success,
            visible: false,
        }
    }
}
