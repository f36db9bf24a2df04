// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded counting resource
//!
//! A fixed pool of units that workers drain one unit at a time. Every claim
//! is a single decrement-if-positive, so the pool can never go negative and
//! a failed claim leaves no trace.

use std::sync::atomic::{AtomicU32, Ordering};
use tracing::debug;

/// A pool of `capacity` units with atomic single-unit claims
#[derive(Debug)]
pub struct CountingResource {
    capacity: u32,
    available: AtomicU32,
}

impl CountingResource {
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            available: AtomicU32::new(capacity),
        }
    }

    /// Claim a single unit. Returns false if the pool is empty.
    pub fn try_claim_one(&self) -> bool {
        self.available
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
            .is_ok()
    }

    /// Claim up to `want` units, stopping at the first failed unit.
    ///
    /// Returns the number of units obtained, `0..=want`.
    pub fn try_claim(&self, want: u32) -> u32 {
        let mut got = 0;
        while got < want && self.try_claim_one() {
            got += 1;
        }
        debug!(want, got, "claimed units");
        got
    }

    /// Snapshot of units still available
    pub fn remaining(&self) -> u32 {
        self.available.load(Ordering::Acquire)
    }

    /// Units handed out so far
    pub fn claimed(&self) -> u32 {
        self.capacity - self.remaining()
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}

#[cfg(test)]
#[path = "resource_tests.rs"]
mod tests;
