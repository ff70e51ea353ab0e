mod maps;
mod search;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::search::SearchCommands;

#[derive(Debug, Parser)]
#[command(name = "dsgmap-cli")]
#[command(about = "Find nearby stores by ZIP code or location")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search for stores and print them nearest first
    Search {
        #[command(subcommand)]
        command: SearchCommands,
    },
    /// Print (or open) map links for a store
    MapLink {
        /// Store name used as the map pin label
        #[arg(long)]
        name: String,

        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lng: f64,

        /// Open the link with the system handler instead of printing it
        #[arg(long)]
        open: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { command } => {
            let config = dsgmap_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            tracing::debug!(?config, "configuration loaded");
            search::run_search(command, &config).await
        }
        Commands::MapLink {
            name,
            lat,
            lng,
            open,
        } => {
            init_tracing("info")?;
            maps::run_map_link(&name, lat, lng, open)
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over `default_level`.
/// Logs go to stderr so stdout stays clean for results.
fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
