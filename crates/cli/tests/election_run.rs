// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI integration tests for the election protocol (rally election)

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(deprecated)]

mod common;

use assert_cmd::Command;
use common::{lines, ConfigDir, QUICK_CONFIG};

#[test]
fn election_prints_one_lead_per_round() {
    let config = ConfigDir::with(QUICK_CONFIG);

    let output = Command::cargo_bin("rally")
        .unwrap()
        .arg("election")
        .arg("--config")
        .arg(config.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let lines = lines(&output.stdout);
    let headers: Vec<_> = lines.iter().filter(|l| l.starts_with("== Round")).collect();
    assert_eq!(headers, vec!["== Round 1 ==", "== Round 2 ==", "== Round 3 =="]);

    for round in 1..=3 {
        let prefix = format!("Round {round}: ");
        let leads = lines
            .iter()
            .filter(|l| l.starts_with(&prefix) && l.ends_with("takes the lead."))
            .count();
        let standbys = lines
            .iter()
            .filter(|l| l.starts_with(&prefix) && l.ends_with("stands by."))
            .count();
        assert_eq!(leads, 1, "round {round}");
        assert_eq!(standbys, 1, "round {round}");
    }
    assert_eq!(lines.len(), 9);
}

#[test]
fn election_logs_stay_off_stdout() {
    let config = ConfigDir::with(QUICK_CONFIG);

    let output = Command::cargo_bin("rally")
        .unwrap()
        .env("RUST_LOG", "debug")
        .args(["election", "--seed", "3", "--config"])
        .arg(config.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    for line in lines(&output.stdout) {
        assert!(line.starts_with("== Round") || line.starts_with("Round "), "{line}");
    }
    assert!(!output.stderr.is_empty());
}
