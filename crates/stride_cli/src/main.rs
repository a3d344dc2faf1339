//! Stride Engine CLI
//!
//! 보상/미션 밸런싱 확인용 오프라인 드라이버
//! JSON 요청 파일을 엔진에 그대로 흘려보내고 응답을 stdout에 찍는다

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

use stride_core::{MemoryStore, SCHEMA_VERSION};

#[derive(Parser)]
#[command(name = "stride_cli")]
#[command(about = "Drive the Stride reward engine from the command line", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a reward breakdown from a movement request JSON file
    Reward {
        /// Input request JSON file path
        #[arg(long)]
        input: PathBuf,

        /// Override the luck-roll seed in the request
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show the deterministic daily missions for a user/date
    Missions {
        /// User identifier
        #[arg(long)]
        user: String,

        /// Reference timestamp, RFC3339 UTC (e.g. 2026-03-02T01:00:00Z)
        #[arg(long)]
        now: String,
    },

    /// Replay a progress event file against a fresh in-memory store
    Event {
        /// Input event request JSON file path
        #[arg(long)]
        input: PathBuf,

        /// Repeat the event N times (replay/idempotence checks)
        #[arg(long, default_value = "1")]
        repeat: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Reward { input, seed } => {
            let mut request: serde_json::Value = serde_json::from_str(
                &fs::read_to_string(&input)
                    .with_context(|| format!("reading {}", input.display()))?,
            )
            .context("request file is not valid JSON")?;
            if let Some(seed) = seed {
                request["seed"] = serde_json::json!(seed);
            }

            let response = stride_core::compute_reward_json(&request.to_string())
                .map_err(|e| anyhow!("engine rejected request: {e}"))?;
            print_pretty(&response)?;
        }

        Commands::Missions { user, now } => {
            let store = MemoryStore::new();
            let request = serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "user_id": user,
                "now": now,
            });
            let response = stride_core::daily_missions_json(&store, &request.to_string())
                .map_err(|e| anyhow!("engine rejected request: {e}"))?;
            print_pretty(&response)?;
        }

        Commands::Event { input, repeat } => {
            let request = fs::read_to_string(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let store = MemoryStore::new();
            for round in 1..=repeat {
                let response = stride_core::progress_event_json(&store, &request)
                    .map_err(|e| anyhow!("engine rejected request: {e}"))?;
                println!("--- round {round} ---");
                print_pretty(&response)?;
            }
        }
    }

    Ok(())
}

fn print_pretty(response: &str) -> Result<()> {
    let value: serde_json::Value = serde_json::from_str(response)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
