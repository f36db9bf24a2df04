// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI integration tests for configuration failures

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(deprecated)]

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use common::ConfigDir;

#[test]
fn missing_config_file_fails() {
    Command::cargo_bin("rally")
        .unwrap()
        .args(["--config", "/nonexistent/rally.toml", "election"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("rally.toml"));
}

#[test]
fn zero_workers_is_rejected() {
    let config = ConfigDir::with("[election]\nworkers = 0\n");

    Command::cargo_bin("rally")
        .unwrap()
        .arg("--config")
        .arg(config.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("worker count must be at least 1"));
}

#[test]
fn malformed_config_is_rejected() {
    let config = ConfigDir::with("[sequence\nworkers = 2\n");

    Command::cargo_bin("rally")
        .unwrap()
        .arg("--config")
        .arg(config.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config"));
}
