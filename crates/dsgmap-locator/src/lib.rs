pub mod client;
pub mod error;
pub mod location;
pub mod maps;
pub mod normalize;
pub mod pipeline;
pub mod search;
pub mod types;

pub use client::StoreLocatorClient;
pub use error::LocatorError;
pub use location::{FixedLocation, LocationSource};
pub use maps::{geo_uri, open_in_maps, web_fallback_url, LaunchError, MapLauncher, MapTarget};
pub use normalize::{map_search_response, normalize_results, to_display_store};
pub use pipeline::StoreSearchBackend;
pub use search::{StoreSearch, LOCATION_UNAVAILABLE_MESSAGE};
pub use types::{Store, StoreResult, StoreSearchResponse};
