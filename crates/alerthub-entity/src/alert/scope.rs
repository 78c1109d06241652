//! Alert visibility scope enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use alerthub_core::error::AppError;

/// The authorization rule class of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityScope {
    /// Everyone in the organization.
    Org,
    /// Members of the listed teams.
    Teams,
    /// The listed email addresses or user ids.
    Users,
}

impl VisibilityScope {
    /// Return the scope as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Org => "org",
            Self::Teams => "teams",
            Self::Users => "users",
        }
    }
}

impl fmt::Display for VisibilityScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VisibilityScope {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "org" => Ok(Self::Org),
            "teams" => Ok(Self::Teams),
            "users" => Ok(Self::Users),
            other => Err(AppError::invalid_field(
                "visibility_scope",
                format!("unknown scope '{other}'"),
            )),
        }
    }
}
