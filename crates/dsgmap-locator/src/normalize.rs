//! Normalization from raw store-search types to [`dsgmap_core::DisplayStore`].

use dsgmap_core::DisplayStore;

use crate::error::LocatorError;
use crate::types::{Store, StoreResult, StoreSearchResponse};

const UNKNOWN_LOCATION: &str = "Unknown Location";
const UNKNOWN_ADDRESS: &str = "Unknown Address";

/// Takes ownership of the canonical result list: `results` when non-empty,
/// otherwise `stores`, otherwise nothing.
#[must_use]
pub fn normalize_results(response: StoreSearchResponse) -> Vec<StoreResult> {
    if response.results.is_empty() {
        response.stores.unwrap_or_default()
    } else {
        response.results
    }
}

/// Maps a whole response into display records sorted ascending by distance.
///
/// Entries that cannot be mapped are dropped; the rest of the batch is kept.
/// The sort is stable, so stores at equal distance keep their API order.
#[must_use]
pub fn map_search_response(response: StoreSearchResponse) -> Vec<DisplayStore> {
    let mut stores: Vec<DisplayStore> = normalize_results(response)
        .into_iter()
        .enumerate()
        .filter_map(|(index, result)| match to_display_store(result) {
            Ok(store) => Some(store),
            Err(e) => {
                tracing::debug!(index, error = %e, "dropping unmappable store result");
                None
            }
        })
        .collect();

    stores.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    stores
}

/// Converts one search hit into a [`DisplayStore`].
///
/// # Errors
///
/// Returns [`LocatorError::Mapping`] when the payload sent `"store": null`.
pub fn to_display_store(result: StoreResult) -> Result<DisplayStore, LocatorError> {
    let store = result.store.ok_or_else(|| LocatorError::Mapping {
        reason: "result store is null".into(),
    })?;

    let address = build_address(&store);
    let location = build_location_label(&store);
    let latitude = parse_coordinate(store.lat.as_deref());
    let longitude = parse_coordinate(store.lng.as_deref());

    Ok(DisplayStore {
        id: store.location.unwrap_or_default(),
        name: store.name.unwrap_or_default(),
        distance: result.distance.unwrap_or(0.0),
        location,
        address,
        latitude,
        longitude,
    })
}

/// `"{city}, {state}"` when both are non-empty, else `"Unknown Location"`.
fn build_location_label(store: &Store) -> String {
    let city = store.city.as_deref().unwrap_or_default();
    let state = store.state.as_deref().unwrap_or_default();
    if city.is_empty() || state.is_empty() {
        UNKNOWN_LOCATION.to_string()
    } else {
        format!("{city}, {state}")
    }
}

/// Joins street lines, city, and state/zip with `", "`.
///
/// Blank parts are skipped. Returns `"Unknown Address"` when every part is
/// blank.
fn build_address(store: &Store) -> String {
    let street1 = non_blank(store.street1.as_deref());
    let street2 = non_blank(store.street2.as_deref());
    let city = non_blank(store.city.as_deref());

    let state_zip = match (
        non_blank(store.state.as_deref()),
        non_blank(store.zip.as_deref()),
    ) {
        (Some(state), Some(zip)) => Some(format!("{state} {zip}")),
        (Some(state), None) => Some(state.to_string()),
        (None, Some(zip)) => Some(zip.to_string()),
        (None, None) => None,
    };

    let parts: Vec<&str> = [street1, street2, city, state_zip.as_deref()]
        .into_iter()
        .flatten()
        .collect();

    if parts.is_empty() {
        UNKNOWN_ADDRESS.to_string()
    } else {
        parts.join(", ")
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// Parses decimal-degree text, falling back to `0.0` on absent or malformed
/// input.
fn parse_coordinate(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
