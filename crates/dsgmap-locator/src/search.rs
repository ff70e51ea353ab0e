//! Store search orchestrator.
//!
//! [`StoreSearch`] owns the current [`SearchState`] and drives the search
//! pipeline. Front ends observe transitions through [`StoreSearch::subscribe`].
//!
//! Only the most recently started search may publish a result. Every search
//! and every pause bumps a generation counter; a completing search compares
//! its generation against the current one under the state lock and discards
//! its result when they differ.

use std::sync::atomic::{AtomicU64, Ordering};

use dsgmap_core::{Coordinates, DisplayStore, SearchState};
use tokio::sync::watch;

use crate::error::LocatorError;
use crate::location::LocationSource;
use crate::pipeline::StoreSearchBackend;

pub const LOCATION_UNAVAILABLE_MESSAGE: &str =
    "Could not determine your location. Please try again or search by ZIP code.";

const LOAD_FAILED_PREFIX: &str = "Failed to load stores";
const UNKNOWN_ERROR: &str = "Unknown error";

pub struct StoreSearch<B, L> {
    backend: B,
    location: L,
    state: watch::Sender<SearchState>,
    generation: AtomicU64,
}

impl<B, L> StoreSearch<B, L>
where
    B: StoreSearchBackend,
    L: LocationSource,
{
    #[must_use]
    pub fn new(backend: B, location: L) -> Self {
        let (state, _) = watch::channel(SearchState::Initial);
        Self {
            backend,
            location,
            state,
            generation: AtomicU64::new(0),
        }
    }

    /// Returns a receiver that sees every subsequent state transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn has_location_permission(&self) -> bool {
        self.location.has_permission()
    }

    /// Searches near a ZIP code. Blank input is ignored without touching state.
    pub async fn search_by_zip_code(&self, zip_code: &str) {
        if zip_code.trim().is_empty() {
            return;
        }

        let generation = self.begin();
        let result = self.backend.search_by_zip_code(zip_code).await;
        self.finish(generation, result);
    }

    /// Resolves the current location, then searches near it.
    ///
    /// A missing fix ends the search in [`SearchState::Error`] with
    /// [`LOCATION_UNAVAILABLE_MESSAGE`].
    pub async fn search_by_current_location(&self) {
        let generation = self.begin();

        let Some(coordinates) = self.location.current_location().await else {
            tracing::info!("location unavailable; search aborted");
            self.publish(
                generation,
                SearchState::Error(LOCATION_UNAVAILABLE_MESSAGE.to_string()),
            );
            return;
        };

        let result = self.backend.search_by_location(coordinates).await;
        self.finish(generation, result);
    }

    /// Searches near explicit coordinates, bypassing the location source.
    pub async fn search_by_coordinates(&self, coordinates: Coordinates) {
        let generation = self.begin();
        let result = self.backend.search_by_location(coordinates).await;
        self.finish(generation, result);
    }

    /// Resets to [`SearchState::Initial`] and invalidates any in-flight search.
    pub fn on_pause(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.state.send_replace(SearchState::Initial);
    }

    fn begin(&self) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_replace(SearchState::Loading);
        generation
    }

    fn finish(&self, generation: u64, result: Result<Vec<DisplayStore>, LocatorError>) {
        let next = match result {
            Ok(stores) if stores.is_empty() => SearchState::Empty,
            Ok(stores) => SearchState::Success(stores),
            Err(e) => {
                tracing::warn!(error = %e, "store search failed");
                SearchState::Error(failure_message(&e))
            }
        };
        self.publish(generation, next);
    }

    fn publish(&self, generation: u64, next: SearchState) {
        let applied = self.state.send_if_modified(|current| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *current = next;
            true
        });

        if !applied {
            tracing::debug!(generation, "discarding superseded search result");
        }
    }
}

fn failure_message(error: &LocatorError) -> String {
    let description = error.to_string();
    let description = description.trim();
    if description.is_empty() {
        format!("{LOAD_FAILED_PREFIX}: {UNKNOWN_ERROR}")
    } else {
        format!("{LOAD_FAILED_PREFIX}: {description}")
    }
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
