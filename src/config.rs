//! Configuration types for the classifier.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Main configuration for a [`Classifier`](crate::Classifier).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Which detectors run
    pub detection: DetectionConfig,

    /// User-Agent rule settings
    pub user_agent: UserAgentConfig,
}

impl ClassifierConfig {
    /// Check the configuration for values the detectors cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.user_agent.min_length == 0 {
            return Err(Error::InvalidConfig(
                "user_agent.min_length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Detection settings.
///
/// Disabling a detector removes it from the cascade; the others keep their
/// relative order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Enable prefetch header detection
    pub prefetch: bool,

    /// Enable infrastructure IP range lookup
    pub ip_ranges: bool,

    /// Enable User-Agent rules
    pub user_agent: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            prefetch: true,
            ip_ranges: true,
            user_agent: true,
        }
    }
}

/// User-Agent rule settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// User-Agents with fewer characters than this are flagged as short
    pub min_length: usize,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self { min_length: 10 }
    }
}
