//! Weekly activity-log task status.

use serde::{Deserialize, Serialize};

/// Completion state of one weekly facilitator task.
///
/// Column/wire values keep the original capitalized spellings, including
/// the space in "Not Started".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "Done")]
    Done,
    #[serde(rename = "Pending")]
    Pending,
    #[serde(rename = "Not Started")]
    NotStarted,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Done => "Done",
            Self::Pending => "Pending",
            Self::NotStarted => "Not Started",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Done" => Some(Self::Done),
            "Pending" => Some(Self::Pending),
            "Not Started" => Some(Self::NotStarted),
            _ => None,
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}
