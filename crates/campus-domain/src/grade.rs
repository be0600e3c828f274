//! Grade publication status.

use serde::{Deserialize, Serialize};

/// Publication state of a grade record.
///
/// `draft -> published` is one-way; `published` is terminal for the
/// publish operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeStatus {
    Draft,
    Published,
    Archived,
}

impl GradeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "published" => Some(Self::Published),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }
}

impl Default for GradeStatus {
    fn default() -> Self {
        Self::Draft
    }
}
