// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Strict sequential access to a shrinking pool
//!
//! Workers take turns on an ordered handoff chain. On its turn a worker
//! draws how many units it wants, claims them one at a time from the shared
//! pool, and reports what it got. The first worker to come away empty-handed
//! wins the one-seat sold-out election and announces exhaustion. A worker
//! always advances the chain, whatever its outcome.

use crate::config::SequenceConfig;
use crate::coordination::{CountingResource, Election, OrderedHandoffChain};
use crate::entropy::Entropy;
use crate::error::{ConfigError, CoordinationError};
use crate::sink::{Record, SerializedSink};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// What one worker did on its turn
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnRecord {
    /// Worker id, 1-based
    pub worker: usize,
    /// Order in which the turn was granted, 0-based
    pub sequence: u64,
    pub requested: u32,
    pub bought: u32,
    /// Pool size observed right after this worker's claims
    pub remaining: u32,
    pub announced_sold_out: bool,
}

/// Outcome of a full sequential run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceReport {
    pub capacity: u32,
    /// One entry per worker, ordered by worker id
    pub turns: Vec<TurnRecord>,
    pub final_remaining: u32,
}

impl SequenceReport {
    pub fn total_bought(&self) -> u32 {
        self.turns.iter().map(|t| t.bought).sum()
    }

    pub fn sold_out_announcements(&self) -> usize {
        self.turns.iter().filter(|t| t.announced_sold_out).count()
    }
}

/// Shared state handed to every worker
struct SequenceContext {
    chain: OrderedHandoffChain,
    pool: CountingResource,
    sold_out: Election,
    sink: Arc<SerializedSink>,
}

/// Drives the sequential-access scenario
pub struct SequenceController<E: Entropy> {
    config: SequenceConfig,
    entropy: E,
    sink: Arc<SerializedSink>,
    demands: Vec<u32>,
}

impl<E: Entropy> SequenceController<E> {
    pub fn new(config: SequenceConfig, entropy: E, sink: Arc<SerializedSink>) -> Self {
        Self {
            config,
            entropy,
            sink,
            demands: Vec::new(),
        }
    }

    /// Fix the request of worker `i + 1` to `demands[i]`.
    ///
    /// Workers beyond the list draw at random as usual. Each demand must lie
    /// in `1..=max_request`; [`run`](Self::run) rejects the run otherwise.
    pub fn with_demands(mut self, demands: Vec<u32>) -> Self {
        self.demands = demands;
        self
    }

    /// Run every worker's turn in order.
    ///
    /// Returns `Config` for an invalid config or fixed demand, and
    /// `Cancelled` if `cancel` fires before the chain drains.
    pub async fn run(&self, cancel: &CancellationToken) -> Result<SequenceReport, CoordinationError> {
        self.validate()?;

        let ctx = Arc::new(SequenceContext {
            chain: OrderedHandoffChain::new(self.config.workers)?,
            pool: CountingResource::new(self.config.total_units),
            sold_out: Election::new(1),
            sink: Arc::clone(&self.sink),
        });

        info!(
            workers = self.config.workers,
            total_units = self.config.total_units,
            max_request = self.config.max_request,
            "sequence started"
        );

        // Dropping the set aborts any worker left behind by an early return
        let mut workers = JoinSet::new();
        for id in 1..=self.config.workers {
            let buyer = Buyer {
                id,
                ctx: Arc::clone(&ctx),
                rng: self.entropy.worker_rng(id),
                fixed_demand: self.demands.get(id - 1).copied(),
                max_request: self.config.max_request,
                turn_pause: self.config.turn_pause,
            };
            let cancel = cancel.clone();
            workers.spawn(async move { buyer.run(cancel).await });
        }

        let mut turns = Vec::with_capacity(self.config.workers);
        while let Some(joined) = workers.join_next().await {
            turns.push(joined??);
        }
        turns.sort_by_key(|t| t.worker);

        let final_remaining = ctx.pool.remaining();
        info!(
            sold = ctx.pool.claimed(),
            remaining = final_remaining,
            "sequence complete"
        );

        Ok(SequenceReport {
            capacity: ctx.pool.capacity(),
            turns,
            final_remaining,
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.config.validate()?;
        let max_request = self.config.max_request;
        for (i, &demand) in self.demands.iter().enumerate() {
            if !(1..=max_request).contains(&demand) {
                return Err(ConfigError::DemandOutOfRange {
                    worker: i + 1,
                    demand,
                    max_request,
                });
            }
        }
        Ok(())
    }
}

/// One worker in the handoff chain
struct Buyer {
    id: usize,
    ctx: Arc<SequenceContext>,
    rng: ChaCha8Rng,
    fixed_demand: Option<u32>,
    max_request: u32,
    turn_pause: Duration,
}

impl Buyer {
    async fn run(mut self, cancel: CancellationToken) -> Result<TurnRecord, CoordinationError> {
        let turn = self.ctx.chain.wait_turn(self.id - 1, &cancel).await?;

        let requested = match self.fixed_demand {
            Some(want) => want,
            None => self.rng.gen_range(1..=self.max_request),
        };
        let bought = self.ctx.pool.try_claim(requested);
        let remaining = self.ctx.pool.remaining();

        let mut announced_sold_out = false;
        if bought > 0 {
            self.ctx.sink.emit(Record::Purchase {
                worker: self.id,
                bought,
                remaining,
            });
        } else if remaining == 0 && self.ctx.sold_out.elect_one().is_some() {
            self.ctx.sink.emit(Record::SoldOut { worker: self.id });
            announced_sold_out = true;
        }
        debug!(
            worker = self.id,
            requested, bought, remaining, "turn finished"
        );

        if !self.turn_pause.is_zero() {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(CoordinationError::Cancelled),
                _ = tokio::time::sleep(self.turn_pause) => {}
            }
        }

        let sequence = turn.sequence();
        turn.advance();

        Ok(TurnRecord {
            worker: self.id,
            sequence,
            requested,
            bought,
            remaining,
            announced_sold_out,
        })
    }
}

#[cfg(test)]
#[path = "sequence_tests.rs"]
mod tests;
