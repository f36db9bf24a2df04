// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for rally CLI integration tests.

#![allow(dead_code)]

use std::fs;
use tempfile::TempDir;

/// A scratch directory holding a rally.toml
pub struct ConfigDir {
    pub dir: TempDir,
}

impl ConfigDir {
    pub fn with(content: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(dir.path().join("rally.toml"), content).expect("Failed to write config");
        Self { dir }
    }

    pub fn path(&self) -> std::path::PathBuf {
        self.dir.path().join("rally.toml")
    }
}

/// Small, fast settings for both protocols
pub const QUICK_CONFIG: &str = r#"
[election]
workers = 5
rounds = 3
jitter_max = "2ms"

[sequence]
workers = 6
total_units = 10
max_request = 4
"#;

/// Non-empty lines of stdout
pub fn lines(stdout: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(str::to_string)
        .collect()
}
