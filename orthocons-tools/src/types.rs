//! Common types for tool management

use crate::error::ToolError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// External programs driven by orthocons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tool {
    TCoffee,
    Rate4Site,
}

impl Tool {
    /// Get the name of the tool
    pub fn name(&self) -> &'static str {
        match self {
            Tool::TCoffee => "tcoffee",
            Tool::Rate4Site => "rate4site",
        }
    }

    /// Get the display name of the tool
    pub fn display_name(&self) -> &'static str {
        match self {
            Tool::TCoffee => "T-Coffee",
            Tool::Rate4Site => "Rate4Site",
        }
    }

    /// Get the default binary name for the tool
    pub fn binary_name(&self) -> &'static str {
        match self {
            Tool::TCoffee => "t_coffee",
            Tool::Rate4Site => "rate4site",
        }
    }

    /// Resolve a configured binary (a bare name looked up on PATH, or a path)
    pub fn locate(&self, configured: &str) -> Result<PathBuf, ToolError> {
        let not_installed = || ToolError::NotInstalled {
            tool: *self,
            binary: configured.to_string(),
        };

        let candidate = Path::new(configured);
        if candidate.components().count() > 1 {
            return if candidate.is_file() {
                Ok(candidate.to_path_buf())
            } else {
                Err(not_installed())
            };
        }

        which::which(configured).map_err(|_| not_installed())
    }

    /// Check if the configured binary can be found
    pub fn is_available(&self, configured: &str) -> bool {
        self.locate(configured).is_ok()
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Tool {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "tcoffee" | "t_coffee" | "t-coffee" => Ok(Tool::TCoffee),
            "rate4site" | "r4s" => Ok(Tool::Rate4Site),
            _ => anyhow::bail!("Unknown tool: {}", s),
        }
    }
}
