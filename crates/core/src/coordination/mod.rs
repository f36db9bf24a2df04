// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coordination primitives for in-process worker pools
//!
//! This module provides:
//! - **CountingResource** - Bounded pool with atomic single-unit claims
//! - **SingleUseToken** / **Election** - One winner per seat per epoch
//! - **OrderedHandoffChain** - Strict turn order across workers
//! - **BroadcastBarrier** - Round release with an explicit drain

pub mod barrier;
pub mod chain;
pub mod resource;
pub mod token;

pub use barrier::{BarrierWaiter, BroadcastBarrier};
pub use chain::{OrderedHandoffChain, Turn};
pub use resource::CountingResource;
pub use token::{Election, Seat, SingleUseToken};
