// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run configuration
//!
//! Every knob has a default matching the classic demo constants, so an empty
//! TOML document (or no file at all) yields a runnable configuration.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Election scenario settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElectionConfig {
    /// Number of contending workers
    pub workers: usize,
    /// Number of barrier-gated rounds
    pub rounds: u64,
    /// Upper bound (exclusive) on the random delay before contending
    #[serde(with = "humantime_serde")]
    pub jitter_max: Duration,
}

impl Default for ElectionConfig {
    fn default() -> Self {
        Self {
            workers: 5,
            rounds: 5,
            jitter_max: Duration::from_millis(100),
        }
    }
}

impl ElectionConfig {
    pub fn new(workers: usize, rounds: u64) -> Self {
        Self {
            workers,
            rounds,
            ..Self::default()
        }
    }

    pub fn with_jitter_max(mut self, jitter_max: Duration) -> Self {
        self.jitter_max = jitter_max;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers {
                scenario: "election",
            });
        }
        if self.rounds == 0 {
            return Err(ConfigError::NoRounds);
        }
        Ok(())
    }
}

/// Sequential-access scenario settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceConfig {
    /// Number of workers in the handoff chain
    pub workers: usize,
    /// Capacity of the shared pool
    pub total_units: u32,
    /// Largest quantity a single worker may draw
    pub max_request: u32,
    /// Pause between finishing a turn and releasing the next worker
    #[serde(with = "humantime_serde")]
    pub turn_pause: Duration,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            workers: 25,
            total_units: 70,
            max_request: 6,
            turn_pause: Duration::ZERO,
        }
    }
}

impl SequenceConfig {
    pub fn new(workers: usize, total_units: u32, max_request: u32) -> Self {
        Self {
            workers,
            total_units,
            max_request,
            ..Self::default()
        }
    }

    pub fn with_turn_pause(mut self, pause: Duration) -> Self {
        self.turn_pause = pause;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers {
                scenario: "sequence",
            });
        }
        if self.max_request == 0 {
            return Err(ConfigError::ZeroRequest);
        }
        Ok(())
    }
}

/// Top-level configuration for both scenarios
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RallyConfig {
    pub election: ElectionConfig,
    pub sequence: SequenceConfig,
}

impl RallyConfig {
    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: RallyConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.election.validate()?;
        self.sequence.validate()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
