mod commands;
mod render;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "cafe-cli")]
#[command(about = "Find cafés near you and keep the ones you like")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the current location (cached for a few minutes)
    Locate {
        /// Ignore the cached location and ask for a fresh fix
        #[arg(long)]
        refresh: bool,
    },
    /// Search for cafés around the current location
    Search {
        /// Latitude to search around instead of locating
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,
        /// Longitude to search around instead of locating
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Save a café from the last search results
    Save {
        /// Café id as shown in the search results
        id: String,
    },
    /// List saved cafés
    Saved {
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a café from the saved list
    Remove {
        /// Café id as shown in the saved list
        id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cafe_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let store = Arc::new(cafe_store::FileStore::new(&config.data_dir));
    tracing::debug!(
        data_dir = %config.data_dir.display(),
        env = %config.env,
        "configuration loaded"
    );

    match cli.command {
        Commands::Locate { refresh } => commands::run_locate(&config, store, refresh).await,
        Commands::Search { lat, lon, json } => {
            let explicit = match (lat, lon) {
                (Some(lat), Some(lon)) => Some(cafe_core::Coordinate::new(lat, lon)?),
                _ => None,
            };
            commands::run_search(&config, store, explicit, json).await
        }
        Commands::Save { id } => commands::run_save(&store, &id),
        Commands::Saved { json } => commands::run_saved(&store, json),
        Commands::Remove { id } => commands::run_remove(&store, &id),
    }
}
