// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scenario runners: wire config, entropy and stdout into the controllers

use anyhow::Result;
use rally_core::{
    Entropy, FixedEntropy, RallyConfig, RoundController, SequenceController, SerializedSink,
    SystemEntropy,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub struct RunOptions {
    pub config: RallyConfig,
    /// Fixed seed; wall-clock seeding when absent
    pub seed: Option<u64>,
    /// Shared by both scenarios so every stdout line goes through one lock
    pub sink: Arc<SerializedSink>,
}

pub async fn election(options: &RunOptions, cancel: &CancellationToken) -> Result<()> {
    match options.seed {
        Some(seed) => run_election(options, FixedEntropy::new(seed), cancel).await,
        None => run_election(options, SystemEntropy::new(), cancel).await,
    }
}

pub async fn sequence(options: &RunOptions, cancel: &CancellationToken) -> Result<()> {
    match options.seed {
        Some(seed) => run_sequence(options, FixedEntropy::new(seed), cancel).await,
        None => run_sequence(options, SystemEntropy::new(), cancel).await,
    }
}

async fn run_election<E: Entropy>(
    options: &RunOptions,
    entropy: E,
    cancel: &CancellationToken,
) -> Result<()> {
    let sink = Arc::clone(&options.sink);
    let report = RoundController::new(options.config.election.clone(), entropy, sink)
        .run(cancel)
        .await?;

    let standby_rounds = report.rounds.iter().filter(|r| r.standby.is_some()).count();
    info!(
        rounds = report.rounds.len(),
        standby_rounds, "election finished"
    );
    Ok(())
}

async fn run_sequence<E: Entropy>(
    options: &RunOptions,
    entropy: E,
    cancel: &CancellationToken,
) -> Result<()> {
    let sink = Arc::clone(&options.sink);
    let report = SequenceController::new(options.config.sequence.clone(), entropy, sink)
        .run(cancel)
        .await?;

    info!(
        sold = report.total_bought(),
        remaining = report.final_remaining,
        "sequence finished"
    );
    Ok(())
}
