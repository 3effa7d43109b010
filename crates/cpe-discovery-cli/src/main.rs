// Copyright (c) Contributors to the cpe-discovery project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/example/cpe-discovery

//! A thin demo binary over the `cpe-discovery` facade: `find` streams
//! `findCpe`'s progress events to stdout, `validate` runs `validateCpe`
//! once and prints the outcome.

use clap::{Parser, Subcommand};
use cpe_discovery::{CancellationToken, Discovery, EventKind};
use tokio_stream::StreamExt;
use tracing_subscriber::layer::SubscriberExt;

#[derive(Parser)]
#[command(name = "cpe-discovery", about = "Heuristic CPE 2.3 discovery over the NVD catalog")]
struct Cli {
    /// Increase logging verbosity; repeat for more (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find candidate CPEs for a free-text asset name.
    Find {
        asset_name: String,
        #[arg(long)]
        top_n: Option<usize>,
    },
    /// Check whether a CPE string is well-formed and known to the catalog.
    Validate { cpe: String },
}

fn main() {
    std::process::exit(match run() {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {err}");
            1
        }
    });
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    configure_logging(cli.verbose);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let discovery = Discovery::load()?;
        match cli.command {
            Command::Find { asset_name, top_n } => find(&discovery, asset_name, top_n).await,
            Command::Validate { cpe } => validate(&discovery, &cpe).await,
        }
    })
}

async fn find(discovery: &Discovery, asset_name: String, top_n: Option<usize>) -> Result<(), Box<dyn std::error::Error>> {
    let mut events = discovery.find_cpe(asset_name, top_n, CancellationToken::new());
    while let Some(event) = events.next().await {
        match event.kind {
            EventKind::Progress => println!("[{}] {}", event.phase, event.message),
            EventKind::Completed => {
                let payload = event.payload.expect("completed event always carries a payload");
                println!("found {} of {} total", payload.count, payload.total_found);
                for candidate in &payload.candidates {
                    println!("  {:>6.2}  {}", candidate.score, candidate.cpe.raw);
                }
            }
            EventKind::Error => {
                eprintln!("[{}] {}", event.phase, event.message);
            }
        }
    }
    Ok(())
}

async fn validate(discovery: &Discovery, cpe: &str) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = discovery.validate_cpe(cpe).await;
    println!("valid: {}", outcome.is_valid);
    println!("exists_in_catalog: {}", outcome.exists_in_catalog);
    println!("exact_match: {}", outcome.exact_match);
    println!("deprecated: {}", outcome.deprecated);
    println!("matches_found: {}", outcome.matches_found);
    println!("{}", outcome.message);
    Ok(())
}

/// Simplified `tracing-subscriber` setup: an `EnvFilter` over `RUST_LOG`
/// layered with a verbosity-derived floor, writing plain text to stderr
/// so stdout stays reserved for result output.
fn configure_logging(verbosity: u8) {
    let level_filter = match verbosity {
        0 => tracing_subscriber::filter::LevelFilter::WARN,
        1 => tracing_subscriber::filter::LevelFilter::INFO,
        2 => tracing_subscriber::filter::LevelFilter::DEBUG,
        _ => tracing_subscriber::filter::LevelFilter::TRACE,
    };
    let env_filter = tracing_subscriber::filter::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::filter::EnvFilter::new(level_filter.to_string()));
    let registry = tracing_subscriber::Registry::default().with(env_filter);
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr).without_time().with_target(false);
    let subscriber = registry.with(fmt_layer);
    let _ = tracing::subscriber::set_global_default(subscriber);
}
