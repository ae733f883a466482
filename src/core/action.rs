//! Deployment verbs accepted on the command line

use crate::error::DeployError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Action requested by the positional argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Show the inventory and the operation file
    Check,
    /// Compose an update run
    Update,
    /// Compose a deploy run
    Deploy,
    /// Recognized, nothing is composed yet
    Rollback,
}

impl Action {
    /// Keyword as typed on the command line
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Check => "check",
            Self::Update => "update",
            Self::Deploy => "deploy",
            Self::Rollback => "rollback",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = DeployError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "check" => Ok(Self::Check),
            "update" => Ok(Self::Update),
            "deploy" => Ok(Self::Deploy),
            "rollback" => Ok(Self::Rollback),
            other => Err(DeployError::unsupported_action(other)),
        }
    }
}
