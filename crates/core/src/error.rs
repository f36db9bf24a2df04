// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for coordination runs

use thiserror::Error;

/// Errors that can occur while driving a coordinated run
#[derive(Debug, Error)]
pub enum CoordinationError {
    #[error("run cancelled")]
    Cancelled,
    #[error("handoff chain must have at least one gate")]
    EmptyChain,
    #[error("gate {index} out of range for chain of {len}")]
    GateOutOfRange { index: usize, len: usize },
    #[error("worker task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
    #[error("invalid run configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Errors produced while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{scenario}: worker count must be at least 1")]
    NoWorkers { scenario: &'static str },
    #[error("election: round count must be at least 1")]
    NoRounds,
    #[error("sequence: max_request must be at least 1")]
    ZeroRequest,
    #[error("sequence: worker {worker} demand {demand} outside 1..={max_request}")]
    DemandOutOfRange {
        worker: usize,
        demand: u32,
        max_request: u32,
    },
}
