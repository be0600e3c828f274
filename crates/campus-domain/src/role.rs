//! User roles.

use serde::{Deserialize, Serialize};

/// Account role. Exactly one per identity, with a matching role-profile row.
///
/// Wire and column format: snake_case string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Facilitator,
    Manager,
}

impl Role {
    /// Column/wire string for this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Facilitator => "facilitator",
            Self::Manager => "manager",
        }
    }

    /// Parse a column/wire string. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "student" => Some(Self::Student),
            "facilitator" => Some(Self::Facilitator),
            "manager" => Some(Self::Manager),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_round_trip_role_strings() {
        for role in [Role::Student, Role::Facilitator, Role::Manager] {
            assert_eq!(Role::from_str(role.as_str()), Some(role));
        }
        assert_eq!(Role::from_str("admin"), None);
    }

    #[test]
    fn should_serialize_as_snake_case() {
        assert_eq!(serde_json::to_string(&Role::Student).unwrap(), "\"student\"");
        assert_eq!(
            serde_json::to_string(&Role::Facilitator).unwrap(),
            "\"facilitator\""
        );
        assert_eq!(serde_json::to_string(&Role::Manager).unwrap(), "\"manager\"");
    }
}
