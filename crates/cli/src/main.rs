// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! rally - run the coordination protocols end to end

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod run;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rally_core::{RallyConfig, SerializedSink};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "rally",
    version,
    about = "Rally - coordination primitives driven by two worker protocols"
)]
struct Cli {
    /// TOML configuration file (defaults apply when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for reproducible worker draws
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Round-based lead/standby election
    Election,
    /// Ordered access to a shared pool
    Sequence,
    /// Both protocols, election first
    All,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging();

    let config = match &cli.config {
        Some(path) => RallyConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => RallyConfig::default(),
    };

    // Ctrl-C unwinds every parked worker instead of leaving them blocked
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Received SIGINT, cancelling run...");
                cancel.cancel();
            }
        });
    }

    let command = cli.command.unwrap_or(Commands::All);
    let options = run::RunOptions {
        config,
        seed: cli.seed,
        sink: Arc::new(SerializedSink::stdout()),
    };

    match command {
        Commands::Election => run::election(&options, &cancel).await?,
        Commands::Sequence => run::sequence(&options, &cancel).await?,
        Commands::All => {
            run::election(&options, &cancel).await?;
            run::sequence(&options, &cancel).await?;
        }
    }

    info!("run complete");
    Ok(())
}

/// Structured logs go to stderr so stdout carries only run records
fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
