use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Account role.
///
/// Roles form a closed set; an account's role is assigned at creation and
/// never changes. The permission table is keyed by the role *name* so that
/// unrecognized names fail closed at evaluation time rather than at parse
/// time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Teacher => "Teacher",
            Role::Student => "Student",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for role names outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" => Ok(Role::Admin),
            "Teacher" => Ok(Role::Teacher),
            "Student" => Ok(Role::Student),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_exact_and_case_sensitive() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert!("admin".parse::<Role>().is_err());
        assert!("Principal".parse::<Role>().is_err());
    }

    #[test]
    fn display_roundtrips() {
        for role in [Role::Admin, Role::Teacher, Role::Student] {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }
}
