// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Round-scoped broadcast barrier
//!
//! The controller raises the barrier once per round to release every
//! subscribed worker, then drains it: each worker reports arrival when its
//! round work is done, and the controller proceeds only once all parties
//! have arrived. Round-scoped state may be reset safely after a drain.

use crate::error::CoordinationError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, Semaphore};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Broadcast release plus per-round completion count
#[derive(Debug)]
pub struct BroadcastBarrier {
    parties: usize,
    generation: watch::Sender<u64>,
    arrivals: Semaphore,
    parked: Arc<AtomicUsize>,
}

/// A worker's handle for waiting on barrier releases
#[derive(Debug)]
pub struct BarrierWaiter {
    rx: watch::Receiver<u64>,
    parked: Arc<AtomicUsize>,
}

impl BroadcastBarrier {
    pub fn new(parties: usize) -> Self {
        let (generation, _) = watch::channel(0);
        Self {
            parties,
            generation,
            arrivals: Semaphore::new(0),
            parked: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn parties(&self) -> usize {
        self.parties
    }

    /// The most recently raised generation (0 before the first raise)
    pub fn generation(&self) -> u64 {
        *self.generation.borrow()
    }

    /// Workers currently parked in [`BarrierWaiter::released`]
    pub fn parked(&self) -> usize {
        self.parked.load(Ordering::Acquire)
    }

    /// Create a waiter that observes only generations raised after this call
    pub fn subscribe(&self) -> BarrierWaiter {
        BarrierWaiter {
            rx: self.generation.subscribe(),
            parked: Arc::clone(&self.parked),
        }
    }

    /// Open the next generation, releasing every waiter. Returns its number.
    pub fn raise(&self) -> u64 {
        self.generation.send_modify(|g| *g += 1);
        let generation = self.generation();
        debug!(generation, parked = self.parked(), "barrier raised");
        generation
    }

    /// Report that this worker finished the current round
    pub fn arrive(&self) {
        self.arrivals.add_permits(1);
    }

    /// Wait until every party has arrived for the current round
    pub async fn drain(&self, cancel: &CancellationToken) -> Result<(), CoordinationError> {
        let needed = u32::try_from(self.parties).unwrap_or(u32::MAX);
        let permits = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(CoordinationError::Cancelled),
            permits = self.arrivals.acquire_many(needed) => permits,
        };
        permits.map_err(|_| CoordinationError::Cancelled)?.forget();
        debug!(generation = self.generation(), "barrier drained");
        Ok(())
    }
}

impl BarrierWaiter {
    /// Park until a generation newer than the last one seen is raised
    pub async fn released(&mut self, cancel: &CancellationToken) -> Result<u64, CoordinationError> {
        let parked = Parked::enter(&self.parked);
        let changed = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(CoordinationError::Cancelled),
            changed = self.rx.changed() => changed.map_err(|_| CoordinationError::Cancelled),
        };
        drop(parked);
        changed?;
        Ok(*self.rx.borrow_and_update())
    }
}

/// Counts a waiter as parked for as long as it lives, including when the
/// waiting future is dropped mid-await.
struct Parked<'a>(&'a AtomicUsize);

impl<'a> Parked<'a> {
    fn enter(count: &'a AtomicUsize) -> Self {
        count.fetch_add(1, Ordering::AcqRel);
        Self(count)
    }
}

impl Drop for Parked<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
#[path = "barrier_tests.rs"]
mod tests;
