//! Moderation status - shared by channels, materials, and teacher verifications

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Moderation state of a reviewable entity
///
/// Transitions are `pending -> approved` or `pending -> rejected`; both
/// outcomes are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ModerationStatus {
    /// Database / wire representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    #[inline]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    #[inline]
    pub const fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Check if no further transition is possible
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        !self.is_pending()
    }
}

impl fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing a status from string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown moderation status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for ModerationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        for status in [
            ModerationStatus::Pending,
            ModerationStatus::Approved,
            ModerationStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<ModerationStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_terminal() {
        assert!(!ModerationStatus::Pending.is_terminal());
        assert!(ModerationStatus::Approved.is_terminal());
        assert!(ModerationStatus::Rejected.is_terminal());
    }
}
