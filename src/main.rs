//! healthwatch - dependency health monitor
//!
//! Runs the configured probes on a schedule until interrupted, or once with `--once`.

#![allow(missing_docs)]

use anyhow::Context;
use clap::Parser;
use healthwatch::utils::logging::init_tracing;
use healthwatch::{Config, MonitoringSystem, OverallStatus};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "healthwatch", version, about)]
struct Cli {
    /// YAML configuration file; environment variables are used when omitted
    #[arg(short, long, env = "HEALTHWATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Run a single check cycle, print the snapshot as JSON and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e).context("Failed to read .env file");
        }
    }

    let config = Config::load(cli.config.as_deref())
        .await
        .context("Failed to load configuration")?;
    init_tracing(&config.logging)?;

    let system = MonitoringSystem::from_config(&config)?;

    if cli.once {
        let snapshot = system.run_once().await;
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(if snapshot.overall_status == OverallStatus::Down {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        });
    }

    if config.probes.is_empty() {
        warn!("No probes configured; only the heartbeat will be tracked");
    }

    system.start();
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;

    info!("Shutdown signal received");
    system.stop().await;
    Ok(ExitCode::SUCCESS)
}
