// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ordered handoff chain
//!
//! N one-shot gates giving N workers a strict turn order. Gate 0 starts
//! open; every other gate opens only when the owner of the previous gate
//! advances its [`Turn`].

use crate::error::CoordinationError;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::debug;

#[derive(Debug)]
struct Gate {
    permit: Semaphore,
    unlocked: AtomicBool,
}

impl Gate {
    fn new(open: bool) -> Self {
        Self {
            permit: Semaphore::new(usize::from(open)),
            unlocked: AtomicBool::new(open),
        }
    }
}

/// Strict FIFO turn order across a fixed set of workers
#[derive(Debug)]
pub struct OrderedHandoffChain {
    gates: Vec<Gate>,
    next_sequence: AtomicU64,
}

/// A worker's turn on the chain.
///
/// Advancing consumes the turn, so each gate opens at most once.
#[derive(Debug)]
#[must_use = "the next worker stays parked until this turn is advanced"]
pub struct Turn<'a> {
    chain: &'a OrderedHandoffChain,
    index: usize,
    sequence: u64,
}

impl OrderedHandoffChain {
    pub fn new(len: usize) -> Result<Self, CoordinationError> {
        if len == 0 {
            return Err(CoordinationError::EmptyChain);
        }
        Ok(Self {
            gates: (0..len).map(|i| Gate::new(i == 0)).collect(),
            next_sequence: AtomicU64::new(0),
        })
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    pub fn is_unlocked(&self, index: usize) -> bool {
        self.gates
            .get(index)
            .is_some_and(|g| g.unlocked.load(Ordering::Acquire))
    }

    fn gate(&self, index: usize) -> Result<&Gate, CoordinationError> {
        self.gates
            .get(index)
            .ok_or(CoordinationError::GateOutOfRange {
                index,
                len: self.gates.len(),
            })
    }

    /// Park until gate `index` opens, or until `cancel` fires.
    pub async fn wait_turn(
        &self,
        index: usize,
        cancel: &CancellationToken,
    ) -> Result<Turn<'_>, CoordinationError> {
        let gate = self.gate(index)?;

        let permit = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(CoordinationError::Cancelled),
            permit = gate.permit.acquire() => permit,
        };
        // Gates are never closed; a closed semaphore can only mean teardown
        permit.map_err(|_| CoordinationError::Cancelled)?.forget();

        let sequence = self.next_sequence.fetch_add(1, Ordering::AcqRel);
        debug!(gate = index, sequence, "turn granted");
        Ok(Turn {
            chain: self,
            index,
            sequence,
        })
    }
}

impl Turn<'_> {
    /// Position of this turn's gate in the chain
    pub fn index(&self) -> usize {
        self.index
    }

    /// Global order in which this turn was granted, starting at 0
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Finish the turn and open the next gate, if any
    pub fn advance(self) {
        let Some(next) = self.chain.gates.get(self.index + 1) else {
            debug!(gate = self.index, "chain drained");
            return;
        };
        next.unlocked.store(true, Ordering::Release);
        next.permit.add_permits(1);
        debug!(gate = self.index + 1, "gate unlocked");
    }
}

#[cfg(test)]
#[path = "chain_tests.rs"]
mod tests;
