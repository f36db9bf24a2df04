// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Round-based single responder election
//!
//! Each round the controller raises the barrier, every worker waits out a
//! random jitter and then runs a two-seat election: the first winner takes
//! the lead, the second stands by, everyone else stays silent. The
//! controller drains the barrier before reopening the seats, so no worker
//! ever races a reset.

use crate::config::ElectionConfig;
use crate::coordination::{BarrierWaiter, BroadcastBarrier, Election, Seat};
use crate::entropy::Entropy;
use crate::error::CoordinationError;
use crate::sink::{Record, SerializedSink};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Who won which seat in one round
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoundOutcome {
    pub round: u64,
    pub primary: Option<usize>,
    pub standby: Option<usize>,
}

/// Outcome of a full election run, one entry per round in order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElectionReport {
    pub rounds: Vec<RoundOutcome>,
}

impl ElectionReport {
    pub fn round(&self, round: u64) -> Option<&RoundOutcome> {
        self.rounds.iter().find(|r| r.round == round)
    }
}

/// Shared state handed to every worker
struct ElectionContext {
    barrier: BroadcastBarrier,
    seats: Election,
    sink: Arc<SerializedSink>,
}

/// Seats one worker won over the run, by round
type Wins = (usize, Vec<(u64, Seat)>);

/// Drives the election scenario
pub struct RoundController<E: Entropy> {
    config: ElectionConfig,
    entropy: E,
    sink: Arc<SerializedSink>,
}

impl<E: Entropy> RoundController<E> {
    pub fn new(config: ElectionConfig, entropy: E, sink: Arc<SerializedSink>) -> Self {
        Self {
            config,
            entropy,
            sink,
        }
    }

    /// Run every round to completion.
    ///
    /// Returns `Config` for an invalid config, and `Cancelled` if `cancel`
    /// fires; any worker still parked is unwound.
    pub async fn run(&self, cancel: &CancellationToken) -> Result<ElectionReport, CoordinationError> {
        self.config.validate()?;

        let ctx = Arc::new(ElectionContext {
            barrier: BroadcastBarrier::new(self.config.workers),
            seats: Election::new(2),
            sink: Arc::clone(&self.sink),
        });

        info!(
            workers = self.config.workers,
            rounds = self.config.rounds,
            "election started"
        );

        // Dropping the set aborts any worker left behind by an early return
        let mut workers = JoinSet::new();
        for id in 1..=self.config.workers {
            // Subscribe before the first raise so no release can be missed
            let waiter = ctx.barrier.subscribe();
            let worker = Contender {
                id,
                ctx: Arc::clone(&ctx),
                rng: self.entropy.worker_rng(id),
                rounds: self.config.rounds,
                jitter_max: self.config.jitter_max,
            };
            let cancel = cancel.clone();
            workers.spawn(async move { worker.run(waiter, cancel).await });
        }

        let mut finished = Vec::with_capacity(self.config.workers);
        for round in 1..=self.config.rounds {
            ctx.sink.emit(Record::RoundHeader { round });
            let generation = ctx.barrier.raise();
            debug!(round, generation, "round released");

            drain_round(&ctx.barrier, &mut workers, &mut finished, cancel).await?;

            ctx.seats.reset();
            info!(round, "round complete");
        }

        while let Some(joined) = workers.join_next().await {
            finished.push(joined??);
        }

        Ok(build_report(self.config.rounds, finished))
    }
}

/// Wait for the round's drain while reaping any worker that exits early
async fn drain_round(
    barrier: &BroadcastBarrier,
    workers: &mut JoinSet<Result<Wins, CoordinationError>>,
    finished: &mut Vec<Wins>,
    cancel: &CancellationToken,
) -> Result<(), CoordinationError> {
    loop {
        tokio::select! {
            biased;
            drained = barrier.drain(cancel) => return drained,
            Some(joined) = workers.join_next() => finished.push(joined??),
        }
    }
}

fn build_report(rounds: u64, finished: Vec<Wins>) -> ElectionReport {
    let mut report = ElectionReport {
        rounds: (1..=rounds)
            .map(|round| RoundOutcome {
                round,
                ..RoundOutcome::default()
            })
            .collect(),
    };

    for (worker, wins) in finished {
        for (round, seat) in wins {
            let index = round.saturating_sub(1) as usize;
            let Some(outcome) = report.rounds.get_mut(index) else {
                continue;
            };
            match seat {
                Seat::PRIMARY => outcome.primary = Some(worker),
                Seat::STANDBY => outcome.standby = Some(worker),
                _ => {}
            }
        }
    }
    report
}

/// One worker in the election
struct Contender {
    id: usize,
    ctx: Arc<ElectionContext>,
    rng: ChaCha8Rng,
    rounds: u64,
    jitter_max: Duration,
}

impl Contender {
    async fn run(
        mut self,
        mut waiter: BarrierWaiter,
        cancel: CancellationToken,
    ) -> Result<Wins, CoordinationError> {
        let mut wins = Vec::new();

        for _ in 0..self.rounds {
            let round = waiter.released(&cancel).await?;

            let jitter = self.jitter();
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(CoordinationError::Cancelled),
                _ = tokio::time::sleep(jitter) => {}
            }

            if let Some(seat) = self.ctx.seats.elect_one() {
                debug!(worker = self.id, round, %seat, "seat won");
                self.ctx.sink.emit(Record::Elected {
                    round,
                    worker: self.id,
                    seat,
                });
                wins.push((round, seat));
            }

            self.ctx.barrier.arrive();
        }

        Ok((self.id, wins))
    }

    fn jitter(&mut self) -> Duration {
        let max = u64::try_from(self.jitter_max.as_micros()).unwrap_or(u64::MAX);
        if max == 0 {
            return Duration::ZERO;
        }
        Duration::from_micros(self.rng.gen_range(0..max))
    }
}

#[cfg(test)]
#[path = "election_tests.rs"]
mod tests;
