// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rally-core: coordination primitives and the protocols built on them
//!
//! This crate provides:
//! - Lock-free primitives: counting resource, single-use tokens, elections
//! - Async waits: ordered handoff chain and broadcast barrier, cancellable
//! - A serialized output sink shared by concurrent workers
//! - Two drivers: a round-based election and sequential pool access

pub mod config;
pub mod coordination;
pub mod entropy;
pub mod error;
pub mod scenario;
pub mod sink;

// Re-exports
pub use config::{ElectionConfig, RallyConfig, SequenceConfig};
pub use coordination::{
    BarrierWaiter, BroadcastBarrier, CountingResource, Election, OrderedHandoffChain, Seat,
    SingleUseToken, Turn,
};
pub use entropy::{Entropy, FixedEntropy, SystemEntropy};
pub use error::{ConfigError, CoordinationError};
pub use scenario::{
    ElectionReport, RoundController, RoundOutcome, SequenceController, SequenceReport,
    TurnRecord,
};
pub use sink::{Record, SerializedSink};
