//! Search pipeline: fetch, normalize, map, sort.
//!
//! [`StoreSearchBackend`] is the seam the orchestrator drives. The
//! [`StoreLocatorClient`] implementation recodes HTTP 404 as an empty result
//! set; every other failure propagates.

use std::future::Future;

use dsgmap_core::{Coordinates, DisplayStore};

use crate::client::StoreLocatorClient;
use crate::error::LocatorError;
use crate::normalize::map_search_response;
use crate::types::StoreSearchResponse;

/// Produces display-ready, distance-sorted stores for a search.
pub trait StoreSearchBackend: Send + Sync {
    fn search_by_zip_code(
        &self,
        zip_code: &str,
    ) -> impl Future<Output = Result<Vec<DisplayStore>, LocatorError>> + Send;

    fn search_by_location(
        &self,
        coordinates: Coordinates,
    ) -> impl Future<Output = Result<Vec<DisplayStore>, LocatorError>> + Send;
}

impl StoreSearchBackend for StoreLocatorClient {
    async fn search_by_zip_code(&self, zip_code: &str) -> Result<Vec<DisplayStore>, LocatorError> {
        into_display_stores(self.fetch_by_zip_code(zip_code).await)
    }

    async fn search_by_location(
        &self,
        coordinates: Coordinates,
    ) -> Result<Vec<DisplayStore>, LocatorError> {
        into_display_stores(self.fetch_by_location(coordinates).await)
    }
}

fn into_display_stores(
    fetched: Result<StoreSearchResponse, LocatorError>,
) -> Result<Vec<DisplayStore>, LocatorError> {
    match fetched {
        Ok(response) => Ok(map_search_response(response)),
        Err(LocatorError::NotFound { url }) => {
            tracing::debug!(%url, "store search returned 404; treating as no results");
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}
