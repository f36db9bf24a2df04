// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Protocols driven over the coordination primitives

pub mod election;
pub mod sequence;

pub use election::{ElectionReport, RoundController, RoundOutcome};
pub use sequence::{SequenceController, SequenceReport, TurnRecord};
