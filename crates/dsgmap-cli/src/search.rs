//! `search` command handlers.

use clap::Subcommand;
use dsgmap_core::{is_valid_zip_code, AppConfig, Coordinates, DisplayStore, SearchState};
use dsgmap_locator::{web_fallback_url, FixedLocation, StoreLocatorClient, StoreSearch};

const NO_STORES_MESSAGE: &str = "We are unable to find stores within the search radius.";

#[derive(Debug, Subcommand)]
pub enum SearchCommands {
    /// Search near a 5-digit ZIP code
    Zip {
        /// ZIP code, e.g. 15108
        zip: String,
    },
    /// Search near the current location (flags, or DSGMAP_LATITUDE/DSGMAP_LONGITUDE)
    Near {
        #[arg(long, allow_negative_numbers = true, requires = "lng")]
        lat: Option<f64>,

        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lng: Option<f64>,
    },
}

/// Runs one search to completion and prints the outcome.
///
/// # Errors
///
/// Returns an error for an invalid ZIP or coordinates, a client that cannot
/// be built, or a search that ends in the error state.
pub(crate) async fn run_search(command: SearchCommands, config: &AppConfig) -> anyhow::Result<()> {
    let client = StoreLocatorClient::from_config(config)?;

    let state = match command {
        SearchCommands::Zip { zip } => {
            let zip = zip.trim();
            if !is_valid_zip_code(zip) {
                anyhow::bail!("'{zip}' is not a valid 5-digit ZIP code");
            }
            let search = StoreSearch::new(client, FixedLocation::new(config.device_location));
            tracing::info!(zip, "searching stores by ZIP code");
            search.search_by_zip_code(zip).await;
            search.state()
        }
        SearchCommands::Near { lat, lng } => {
            let fix = match (lat, lng) {
                (Some(lat), Some(lng)) => {
                    Some(Coordinates::new(lat, lng).map_err(anyhow::Error::msg)?)
                }
                _ => config.device_location,
            };
            let search = StoreSearch::new(client, FixedLocation::new(fix));
            if !search.has_location_permission() {
                tracing::warn!(
                    "no location available; pass --lat/--lng or set DSGMAP_LATITUDE/DSGMAP_LONGITUDE"
                );
            }
            tracing::info!("searching stores near current location");
            search.search_by_current_location().await;
            search.state()
        }
    };

    match state {
        SearchState::Success(stores) => {
            println!("Stores Near You");
            for (index, store) in stores.iter().enumerate() {
                println!("{}", render_store(index + 1, store));
            }
            Ok(())
        }
        SearchState::Empty => {
            println!("{NO_STORES_MESSAGE}");
            Ok(())
        }
        SearchState::Error(message) => anyhow::bail!(message),
        SearchState::Initial | SearchState::Loading => {
            anyhow::bail!("search did not complete")
        }
    }
}

/// Listing entry: name and distance, location, address, map link.
fn render_store(position: usize, store: &DisplayStore) -> String {
    format!(
        "{position}. {name} ({distance:.1} miles)\n   {location}\n   {address}\n   {map}",
        name = store.name,
        distance = store.distance,
        location = store.location,
        address = store.address,
        map = web_fallback_url(store.coordinates()),
    )
}
