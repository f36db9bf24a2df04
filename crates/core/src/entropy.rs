// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-worker random sources
//!
//! Workers never share a generator. Each one gets its own stream, derived
//! from a run-wide seed and the worker id, so a fixed seed replays a run's
//! draws exactly.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::{SystemTime, UNIX_EPOCH};

/// Golden-ratio multiplier used to spread worker ids across the seed space
const SEED_SPREAD: u64 = 0x9e37_79b9;

/// Hands out an independent random stream for each worker
pub trait Entropy: Clone + Send + Sync + 'static {
    fn worker_rng(&self, worker: usize) -> ChaCha8Rng;
}

fn mix(base: u64, worker: usize) -> u64 {
    base ^ (worker as u64).wrapping_mul(SEED_SPREAD)
}

/// Seeds from wall-clock time; every run differs
#[derive(Clone, Debug)]
pub struct SystemEntropy {
    base: u64,
}

impl SystemEntropy {
    pub fn new() -> Self {
        let base = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Self { base }
    }
}

impl Default for SystemEntropy {
    fn default() -> Self {
        Self::new()
    }
}

impl Entropy for SystemEntropy {
    fn worker_rng(&self, worker: usize) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(mix(self.base, worker))
    }
}

/// Deterministic seeding for reproducible runs and tests
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedEntropy {
    seed: u64,
}

impl FixedEntropy {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl Entropy for FixedEntropy {
    fn worker_rng(&self, worker: usize) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(mix(self.seed, worker))
    }
}
