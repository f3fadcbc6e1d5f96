//! User role - the account types recognized by the platform

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role
///
/// `TeacherPending` is a teacher whose proof-of-employment verification has
/// not yet been approved by an administrator; it cannot act as a teacher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    Student,
    Teacher,
    TeacherPending,
    Administrator,
}

impl UserRole {
    /// Database / wire representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::TeacherPending => "teacher_pending",
            Self::Administrator => "administrator",
        }
    }

    /// Check if this role may own channels and publish materials
    #[inline]
    pub const fn is_teacher(&self) -> bool {
        matches!(self, Self::Teacher)
    }

    /// Check if this role may moderate
    #[inline]
    pub const fn is_administrator(&self) -> bool {
        matches!(self, Self::Administrator)
    }

    /// Check if this role may join channels as a consumer
    #[inline]
    pub const fn is_student(&self) -> bool {
        matches!(self, Self::Student)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing a role from string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Self::Student),
            "teacher" => Ok(Self::Teacher),
            "teacher_pending" => Ok(Self::TeacherPending),
            "administrator" => Ok(Self::Administrator),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        for role in [
            UserRole::Student,
            UserRole::Teacher,
            UserRole::TeacherPending,
            UserRole::Administrator,
        ] {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), role);
        }
    }

    #[test]
    fn test_unknown_role() {
        assert!("wizard".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_predicates() {
        assert!(UserRole::Teacher.is_teacher());
        assert!(!UserRole::TeacherPending.is_teacher());
        assert!(UserRole::Administrator.is_administrator());
        assert!(UserRole::Student.is_student());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&UserRole::TeacherPending).unwrap();
        assert_eq!(json, "\"teacher_pending\"");
    }
}
