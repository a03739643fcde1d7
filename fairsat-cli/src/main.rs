//! Fairsat CLI - command-line interface
//!
//! This binary exposes the fairsat library's operations: downloading course
//! imagery, deriving per-hole crops, pushing crops to the companion outbox
//! and maintaining the cache.

mod commands;
mod error;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::cache::CacheAction;
use error::CliError;

#[derive(Debug, Parser)]
#[command(
    name = "fairsat",
    version,
    about = "Per-course satellite imagery cache with companion-device sync"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Download and cache the large satellite image for a course
    Fetch {
        /// Course identifier
        course_id: String,
        /// Latitude of the course center
        #[arg(long)]
        lat: f64,
        /// Longitude of the course center
        #[arg(long)]
        lon: f64,
    },
    /// Derive and cache the crop for one hole
    Crop {
        /// Course identifier
        course_id: String,
        /// Hole number
        #[arg(long)]
        hole: u8,
        /// Latitude of the hole
        #[arg(long)]
        lat: f64,
        /// Longitude of the hole
        #[arg(long)]
        lon: f64,
        /// Latitude of the player, to bias the crop toward the hole
        #[arg(long)]
        user_lat: Option<f64>,
        /// Longitude of the player
        #[arg(long)]
        user_lon: Option<f64>,
    },
    /// Push cached crops into the companion outbox
    Push {
        /// Course identifier
        course_id: String,
        /// Push only this hole instead of the whole course
        #[arg(long)]
        hole: Option<u8>,
    },
    /// List cached course records
    List,
    /// Delete a course's cached imagery
    Delete {
        /// Course identifier
        course_id: String,
    },
    /// Cache maintenance
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

async fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Fetch {
            course_id,
            lat,
            lon,
        } => commands::fetch::run(&course_id, lat, lon).await,
        Command::Crop {
            course_id,
            hole,
            lat,
            lon,
            user_lat,
            user_lon,
        } => commands::crop::run(&course_id, hole, lat, lon, user_lat, user_lon),
        Command::Push { course_id, hole } => commands::push::run(&course_id, hole).await,
        Command::List => commands::cache::run_list(),
        Command::Delete { course_id } => commands::cache::run_delete(&course_id),
        Command::Cache { action } => commands::cache::run(action),
    }
}

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();
    if let Err(e) = run(cli.command).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
