// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-use tokens and the election ladder built from them
//!
//! A token grants exactly one winner per epoch. An [`Election`] stacks
//! tokens into ranked seats: a contender tries seat 0, falls through to seat
//! 1 on loss, and so on, so each seat goes to a different worker.

use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// One-shot gate won by a single contender until reset
#[derive(Debug, Default)]
pub struct SingleUseToken {
    held: AtomicBool,
}

impl SingleUseToken {
    pub fn new() -> Self {
        Self {
            held: AtomicBool::new(false),
        }
    }

    /// Non-blocking acquire. Exactly one caller per epoch sees `true`.
    pub fn try_acquire(&self) -> bool {
        self.held
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Make the token available again.
    ///
    /// Callers must ensure no acquire is in flight.
    pub fn reset(&self) {
        self.held.store(false, Ordering::Release);
    }

    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::Acquire)
    }
}

/// Index of a seat won in an [`Election`]; lower is better
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Seat(pub usize);

impl Seat {
    pub const PRIMARY: Seat = Seat(0);
    pub const STANDBY: Seat = Seat(1);
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Seat::PRIMARY => write!(f, "primary"),
            Seat::STANDBY => write!(f, "standby"),
            Seat(n) => write!(f, "seat-{}", n),
        }
    }
}

/// Ranked ladder of single-use tokens
#[derive(Debug)]
pub struct Election {
    seats: Vec<SingleUseToken>,
}

impl Election {
    pub fn new(seats: usize) -> Self {
        Self {
            seats: (0..seats).map(|_| SingleUseToken::new()).collect(),
        }
    }

    /// Try each seat in rank order and return the first one won.
    ///
    /// `None` means every seat was already taken this epoch.
    pub fn elect_one(&self) -> Option<Seat> {
        let seat = self
            .seats
            .iter()
            .position(SingleUseToken::try_acquire)
            .map(Seat);
        debug!(?seat, "election attempt");
        seat
    }

    /// Reopen every seat for the next epoch
    pub fn reset(&self) {
        for seat in &self.seats {
            seat.reset();
        }
    }

    /// Number of seats won this epoch
    pub fn filled(&self) -> usize {
        self.seats.iter().filter(|s| s.is_held()).count()
    }

    pub fn seats(&self) -> usize {
        self.seats.len()
    }
}

#[cfg(test)]
#[path = "token_tests.rs"]
mod tests;
