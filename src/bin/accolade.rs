//! accolade CLI — operator interface to the trophy engine.

use std::sync::Arc;
use std::time::Duration;

use accolade_rs::config::Config;
use accolade_rs::model::Creator;
use accolade_rs::registry::TrophyRegistry;
use accolade_rs::scanner::{ScanConfig, Scanner};
use accolade_rs::store::TrophyStore;
use accolade_rs::store::postgres::PgStore;
use accolade_rs::telemetry::init_tracing;
use accolade_rs::trophy::builtin;
use clap::{Parser, Subcommand};
use secrecy::ExposeSecret;

#[derive(Parser)]
#[command(name = "accolade", about = "Background trophy engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the stock trophy set
    Trophies,
    /// Show trophies a creator has already unlocked
    Unlocked {
        /// Creator id
        creator_id: u64,
    },
    /// Scan a creator right now and print any fresh unlocks
    Scan {
        /// Creator id
        creator_id: u64,
        /// Creator display name
        name: String,
        /// Print unlock events as JSON lines
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Command::Trophies => cmd_trophies(),
        Command::Unlocked { creator_id } => cmd_unlocked(creator_id).await,
        Command::Scan {
            creator_id,
            name,
            json,
        } => cmd_scan(creator_id, name, json).await,
    }
}

fn stock_registry() -> anyhow::Result<TrophyRegistry> {
    let mut registry = TrophyRegistry::new();
    for trophy in builtin::all() {
        registry.register(trophy)?;
    }
    Ok(registry)
}

fn cmd_trophies() -> anyhow::Result<()> {
    let registry = stock_registry()?;

    println!("{:<16}  {:<16}  DESCRIPTION", "ID", "NAME");
    println!("{}", "-".repeat(70));
    for trophy in registry.list() {
        let description = if trophy.is_hidden() {
            "(hidden)"
        } else {
            trophy.describe()
        };
        println!("{:<16}  {:<16}  {}", trophy.id(), trophy.name(), description);
    }
    println!("\n{} troph(ies)", registry.len());
    Ok(())
}

async fn cmd_unlocked(creator_id: u64) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let store = connect(&config).await?;
    let registry = stock_registry()?;

    let creator = Creator::new(creator_id, "-");
    let unlocked = store.unlocked(&creator, registry.list()).await?;

    if unlocked.is_empty() {
        println!("Creator {creator_id} has no unlocked trophies.");
        return Ok(());
    }

    for trophy in registry.list() {
        if unlocked.contains(trophy.id()) {
            println!("{:<16}  {}", trophy.id(), trophy.name());
        }
    }
    println!("\n{} unlocked", unlocked.len());
    Ok(())
}

async fn cmd_scan(creator_id: u64, name: String, json: bool) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config.log_level)?;
    let store = connect(&config).await?;

    let scanner = Scanner::new(
        stock_registry()?,
        Arc::new(store),
        ScanConfig {
            delay: config.scan_delay,
            ..ScanConfig::default()
        },
    );

    let mut unlocks = scanner.subscribe_unlocks();
    let creator = Creator::new(creator_id, name);
    scanner.enqueue_immediate(&creator)?;

    // Print unlocks as they arrive until the worker parks.
    let mut fresh = 0;
    loop {
        match tokio::time::timeout(Duration::from_millis(200), unlocks.recv()).await {
            Ok(Ok(event)) => {
                if json {
                    println!("{}", serde_json::to_string(&event)?);
                } else {
                    let detail = if event.hidden {
                        "(hidden)".to_string()
                    } else {
                        scanner
                            .registry()
                            .get(&event.trophy_id)
                            .map(|t| t.describe().to_string())
                            .unwrap_or_default()
                    };
                    println!("Unlocked: {} — {detail}", event.trophy_name);
                }
                fresh += 1;
            }
            Ok(Err(_)) => break,
            Err(_) if !scanner.is_active() => break,
            Err(_) => {}
        }
    }

    println!("{fresh} new unlock(s) for creator {creator_id}");
    Ok(())
}

async fn connect(config: &Config) -> anyhow::Result<PgStore> {
    let store = PgStore::connect(config.database_url.expose_secret()).await?;
    store.migrate().await?;
    Ok(store)
}
