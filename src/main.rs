//! Axie team valuation CLI entry point.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use axie_valuer::api::ApiClient;
use axie_valuer::config::Config;
use axie_valuer::metrics;
use axie_valuer::pricing::{inspect_twins, valuate_leaderboard, valuate_player, valuate_roster};
use axie_valuer::report;

/// Axie Infinity leaderboard team valuation.
#[derive(Parser, Debug)]
#[command(name = "axie-valuer")]
#[command(about = "Price ranked players' teams via their cheapest marketplace twins")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sweep a leaderboard range and valuate every team (default).
    Run {
        /// First rank to valuate.
        #[arg(long, default_value = "1")]
        offset: u32,

        /// Number of ranked players to valuate.
        #[arg(long, default_value = "100")]
        places: u32,

        /// Write the result table to this CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Valuate a single player's active team.
    Player {
        /// Player id.
        user_id: String,
    },

    /// Price the cheapest twin of every axie a user owns.
    Roster {
        /// User id.
        user_id: String,

        /// Write the result table to this CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// List the marketplace twins of one axie, cheapest first.
    Twins {
        /// Axie id.
        axie_id: u64,

        /// Number of listings to show (defaults to TWIN_INSPECT_SIZE).
        #[arg(long)]
        size: Option<u32>,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("axie_valuer=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    metrics::init_metrics();

    match args.command {
        Some(Command::Run {
            offset,
            places,
            csv,
        }) => cmd_run(offset, places, csv).await,
        Some(Command::Player { user_id }) => cmd_player(&user_id).await,
        Some(Command::Roster { user_id, csv }) => cmd_roster(&user_id, csv).await,
        Some(Command::Twins { axie_id, size }) => cmd_twins(axie_id, size).await,
        Some(Command::CheckConfig) => cmd_check_config().await,
        None => cmd_run(1, 100, None).await,
    }
}

fn load_config() -> anyhow::Result<Config> {
    let config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Configuration validation failed: {}", e))?;

    Ok(config)
}

/// Sweep a leaderboard range and valuate every team.
async fn cmd_run(offset: u32, places: u32, csv: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config()?;

    if config.metrics_enabled {
        let addr = SocketAddr::from(([0, 0, 0, 0], config.metrics_port));
        match PrometheusBuilder::new().with_http_listener(addr).install() {
            Ok(()) => info!("Prometheus exporter listening on {}", addr),
            Err(e) => warn!("Prometheus exporter disabled: {}", e),
        }
    }

    let client = ApiClient::new(&config);

    info!("========================================");
    info!("LEADERBOARD TEAM VALUATION");
    info!("========================================");
    info!("Ranks: {} to {}", offset, offset + places - 1);
    info!("Battle window: {} games", config.battle_limit);
    info!("Retry budget: {} attempts", config.max_attempts);
    info!("========================================");

    let mut sweep = valuate_leaderboard(&client, &config, offset, places).await?;
    report::sort_by_price(&mut sweep.rows);

    println!("{}", report::render_table(&sweep.rows));

    if let Some(path) = csv {
        report::write_csv(&path, &sweep.rows)?;
        info!("CSV written to {}", path.display());
    }

    let stats = sweep.stats;
    info!("========================================");
    info!("SWEEP COMPLETE");
    info!("========================================");
    info!("Players seen: {}", stats.players_seen);
    info!("Teams priced: {}", stats.players_valuated);
    info!("Skipped (no team/decode/no twin): {}", stats.players_skipped);
    info!("Skipped (request failures): {}", stats.players_failed);
    if stats.over_cap > 0 {
        info!("Dropped by price cap: {}", stats.over_cap);
    }
    info!("========================================");

    Ok(())
}

/// Valuate a single player's active team.
async fn cmd_player(user_id: &str) -> anyhow::Result<()> {
    let config = load_config()?;
    let client = ApiClient::new(&config);

    match valuate_player(&client, &config, user_id, 0).await? {
        Some(valuation) => {
            println!("Player: {}", valuation.player_id);
            println!("Twins: {}", valuation.twin_ids.join(" | "));
            println!("Team price: ${}", valuation.total_price);
        }
        None => {
            println!(
                "Player {} cannot be valued (no eligible history, undecodable genome, or missing twin)",
                user_id
            );
        }
    }

    Ok(())
}

/// Price the cheapest twin of every axie a user owns.
async fn cmd_roster(user_id: &str, csv: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config()?;
    let client = ApiClient::new(&config);

    let rows = valuate_roster(&client, user_id).await?;
    println!("{}", report::render_roster(&rows));

    if let Some(path) = csv {
        report::write_roster_csv(&path, &rows)?;
        info!("CSV written to {}", path.display());
    }

    Ok(())
}

/// List the marketplace twins of one axie.
async fn cmd_twins(axie_id: u64, size: Option<u32>) -> anyhow::Result<()> {
    let config = load_config()?;
    let client = ApiClient::new(&config);
    let size = size.unwrap_or(config.twin_inspect_size);

    let inspection = inspect_twins(&client, axie_id, size).await?;

    println!("Axie {}: {}", axie_id, inspection.signature);

    if inspection.listings.is_empty() {
        println!("No twins currently listed.");
        return Ok(());
    }

    for listing in &inspection.listings {
        println!("  {:>10}  ${}", listing.listing_id, listing.price);
    }

    Ok(())
}

/// Check configuration validity.
async fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("AXIE VALUER - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Leaderboard: {}", config.leaderboard_url);
    println!("  Battle history: {}", config.battles_url);
    println!("  Marketplace: {}", config.marketplace_url);
    println!("  Battle window: {} games", config.battle_limit);
    println!("  Page size: {}", config.leaderboard_page_size);
    println!(
        "  Retry budget: {} attempts, {}ms apart",
        config.max_attempts, config.retry_delay_ms
    );
    match &config.max_team_price {
        Some(cap) => println!("  Price cap: ${}", cap),
        None => println!("  Price cap: none"),
    }
    println!(
        "  Metrics: {}",
        if config.metrics_enabled {
            "Enabled"
        } else {
            "Disabled"
        }
    );
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}
