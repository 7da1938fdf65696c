//! Environment classification
//!
//! Server names are matched against the configured environment patterns in
//! file order. The first rule whose pattern is found anywhere in the name
//! decides the tier.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{EnvironmentRule, Template};

pub const PRODUCTION: &str = "production";
pub const STAGING: &str = "staging";
pub const DEVELOPMENT: &str = "development";

/// Environment a server belongs to, ordered production first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EnvironmentTier {
    Production,
    Staging,
    Development,
    Unknown,
}

impl EnvironmentTier {
    /// Map a configured environment name to a tier. Names are case-sensitive.
    pub fn from_environment_name(name: &str) -> Self {
        match name {
            PRODUCTION => Self::Production,
            STAGING => Self::Staging,
            DEVELOPMENT => Self::Development,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "PRODUCTION",
            Self::Staging => "STAGING",
            Self::Development => "DEVELOPMENT",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for EnvironmentTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a server name. A matching rule with an unrecognised name still
/// ends the scan and yields [`EnvironmentTier::Unknown`].
pub fn classify(server_name: &str, rules: &[EnvironmentRule]) -> EnvironmentTier {
    rules.iter()
        .find(|rule| rule.pattern.is_match(server_name))
        .map(|rule| EnvironmentTier::from_environment_name(&rule.name))
        .unwrap_or(EnvironmentTier::Unknown)
}

/// Base memory in GB for `cpu_count` CPUs, or 0 when no template matches
pub fn base_memory_gb(cpu_count: u32, templates: &[Template]) -> u32 {
    templates.iter()
        .find(|template| template.cpu_count == cpu_count)
        .map(|template| template.memory_gb)
        .unwrap_or(0)
}
