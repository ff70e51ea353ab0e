//! Response types for the store-search endpoint (`GET /api/v4/stores/search`).
//!
//! ## Observed shape
//!
//! ### Result list key
//! Results normally arrive under `"results"`. Some deployments of the API put
//! the same array under `"stores"` instead and leave `"results"` empty or
//! absent. [`StoreSearchResponse::all_results`] reads `"results"` first and
//! falls back to `"stores"`.
//!
//! ### Store fields
//! An entry without a `store` key is read as a store with every field
//! absent; an explicit `"store": null` stays `None` and cannot be displayed.
//! Every field on the `store` object may be missing or `null`; `street2` is
//! usually absent. Coordinates come back as **strings** (`"40.4406"`), not
//! numbers, and occasionally as `""`.
//!
//! ### `distance` / `units`
//! `distance` is a JSON number measured from the search origin; `units` is a
//! free-form label such as `"miles"`. Both default when absent.

use serde::Deserialize;

/// Top-level response from the store-search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreSearchResponse {
    /// Primary result list.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub results: Vec<StoreResult>,

    /// Alternate location of the result list; see the module docs.
    #[serde(default)]
    pub stores: Option<Vec<StoreResult>>,
}

impl StoreSearchResponse {
    /// Returns `results` when non-empty, otherwise `stores`, otherwise an
    /// empty slice.
    #[must_use]
    pub fn all_results(&self) -> &[StoreResult] {
        if self.results.is_empty() {
            self.stores.as_deref().unwrap_or_default()
        } else {
            &self.results
        }
    }
}

/// One search hit: a store plus its distance from the search origin.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreResult {
    /// All-absent [`Store`] when the key is missing; `None` only for an
    /// explicit `"store": null`.
    #[serde(default = "absent_store")]
    pub store: Option<Store>,

    #[serde(default)]
    pub distance: Option<f64>,

    #[serde(default)]
    pub units: Option<String>,
}

/// Store record exactly as the vendor returns it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Store {
    /// Opaque location identifier, e.g. `"1234"`.
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub chain: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub street1: Option<String>,
    #[serde(default)]
    pub street2: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    /// Latitude as decimal text.
    #[serde(default)]
    pub lat: Option<String>,
    /// Longitude as decimal text.
    #[serde(default)]
    pub lng: Option<String>,
}

#[allow(clippy::unnecessary_wraps)]
fn absent_store() -> Option<Store> {
    Some(Store::default())
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<StoreResult>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<Vec<StoreResult>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
