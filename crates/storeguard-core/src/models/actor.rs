use serde::{Deserialize, Serialize};
use std::fmt;

/// Actor roles.
///
/// Roles are capability sets, not an ordinal scale: authorization is
/// decided per operation by role-set membership. EXEC shares
/// OPS_MANAGER's read scope but holds no mutating capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Store,
    PropertyCoordinator,
    OpsManager,
    Exec,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Store => "STORE",
            Self::PropertyCoordinator => "PROPERTY_COORDINATOR",
            Self::OpsManager => "OPS_MANAGER",
            Self::Exec => "EXEC",
        };
        f.write_str(s)
    }
}

/// The identity making a request: user id plus role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub role: Role,
}

impl Actor {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }
}
