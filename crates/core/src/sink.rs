// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Serialized output for concurrent workers
//!
//! Every record is rendered and written as one line while holding the sink
//! lock, so lines from different workers interleave but never split. The
//! lock covers a single write and is never held across an await.

use crate::coordination::Seat;
use std::io::Write;
use std::sync::Mutex;
use tracing::{info, warn};

/// One line of run output
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Record {
    /// Start of an election round
    RoundHeader { round: u64 },
    /// A worker won a seat in a round
    Elected { round: u64, worker: usize, seat: Seat },
    /// A worker's turn on the shared pool obtained at least one unit
    Purchase {
        worker: usize,
        bought: u32,
        remaining: u32,
    },
    /// The pool ran dry; emitted once per run
    SoldOut { worker: usize },
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Record::RoundHeader { round } => write!(f, "== Round {} ==", round),
            Record::Elected {
                round,
                worker,
                seat: Seat::PRIMARY,
            } => write!(f, "Round {}: Worker {} takes the lead.", round, worker),
            Record::Elected {
                round,
                worker,
                seat: Seat::STANDBY,
            } => write!(f, "Round {}: Worker {} stands by.", round, worker),
            Record::Elected {
                round,
                worker,
                seat,
            } => write!(f, "Round {}: Worker {} holds {}.", round, worker, seat),
            Record::Purchase {
                worker,
                bought,
                remaining,
            } => write!(
                f,
                "Worker {} bought {} units. There are {} units remaining.",
                worker, bought, remaining
            ),
            Record::SoldOut { .. } => write!(f, "** The pool is sold out. **"),
        }
    }
}

struct SinkState {
    out: Box<dyn Write + Send>,
    /// Emitted records, kept only by recording sinks
    records: Option<Vec<Record>>,
}

/// Mutual-exclusion wrapper around the run's output stream
pub struct SerializedSink {
    state: Mutex<SinkState>,
}

impl SerializedSink {
    /// A sink that writes lines and keeps nothing in memory
    pub fn new(out: impl Write + Send + 'static) -> Self {
        Self::with_records(out, None)
    }

    /// A sink that writes lines and also keeps every record for inspection
    pub fn recording(out: impl Write + Send + 'static) -> Self {
        Self::with_records(out, Some(Vec::new()))
    }

    fn with_records(out: impl Write + Send + 'static, records: Option<Vec<Record>>) -> Self {
        Self {
            state: Mutex::new(SinkState {
                out: Box::new(out),
                records,
            }),
        }
    }

    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }

    /// A sink that keeps records but writes nothing
    pub fn discard() -> Self {
        Self::recording(std::io::sink())
    }

    /// Write one record as a single line
    pub fn emit(&self, record: Record) {
        let mut guard = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let state = &mut *guard;
        let line = record.to_string();
        if let Err(e) = writeln!(state.out, "{}", line).and_then(|()| state.out.flush()) {
            warn!(error = %e, "failed to write record");
        }
        info!(record = %line, "emitted");
        if let Some(records) = state.records.as_mut() {
            records.push(record);
        }
    }

    /// Every record emitted so far, in emission order.
    ///
    /// Empty unless the sink was built with [`recording`](Self::recording)
    /// or [`discard`](Self::discard).
    pub fn records(&self) -> Vec<Record> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .records
            .clone()
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for SerializedSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let records = self
            .state
            .lock()
            .ok()
            .and_then(|s| s.records.as_ref().map(Vec::len));
        f.debug_struct("SerializedSink")
            .field("records", &records)
            .finish()
    }
}

#[cfg(test)]
#[path = "sink_tests.rs"]
mod tests;
