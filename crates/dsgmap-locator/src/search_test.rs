use std::collections::HashMap;
use std::sync::Mutex;

use tokio::sync::oneshot;

use super::*;
use crate::location::FixedLocation;

type SearchResult = Result<Vec<DisplayStore>, LocatorError>;

fn store(id: &str, distance: f64) -> DisplayStore {
    DisplayStore {
        id: id.to_string(),
        name: format!("DSG {id}"),
        distance,
        location: "Pittsburgh, PA".to_string(),
        address: "123 Main St, Pittsburgh, PA 15108".to_string(),
        latitude: 40.4406,
        longitude: -79.9959,
    }
}

fn server_error() -> LocatorError {
    LocatorError::UnexpectedStatus {
        status: 500,
        reason: "Internal Server Error".to_string(),
        url: "https://stores.example.com/api/v4/stores/search".to_string(),
    }
}

/// Answers every search immediately and records what was asked.
struct StubBackend {
    respond: Box<dyn Fn() -> SearchResult + Send + Sync>,
    calls: Mutex<Vec<String>>,
}

impl StubBackend {
    fn new(respond: impl Fn() -> SearchResult + Send + Sync + 'static) -> Self {
        Self {
            respond: Box::new(respond),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl StoreSearchBackend for StubBackend {
    async fn search_by_zip_code(&self, zip_code: &str) -> SearchResult {
        self.calls.lock().unwrap().push(format!("zip:{zip_code}"));
        (self.respond)()
    }

    async fn search_by_location(&self, coordinates: Coordinates) -> SearchResult {
        self.calls.lock().unwrap().push(format!("loc:{coordinates}"));
        (self.respond)()
    }
}

/// Holds each ZIP search open until the test releases it through a oneshot.
struct GatedBackend {
    gates: Mutex<HashMap<String, oneshot::Receiver<SearchResult>>>,
}

impl GatedBackend {
    fn new<const N: usize>(gates: [(&str, oneshot::Receiver<SearchResult>); N]) -> Self {
        Self {
            gates: Mutex::new(
                gates
                    .into_iter()
                    .map(|(zip, rx)| (zip.to_string(), rx))
                    .collect(),
            ),
        }
    }
}

impl StoreSearchBackend for GatedBackend {
    async fn search_by_zip_code(&self, zip_code: &str) -> SearchResult {
        let gate = self
            .gates
            .lock()
            .unwrap()
            .remove(zip_code)
            .expect("no gate registered for zip");
        gate.await.expect("gate sender dropped")
    }

    async fn search_by_location(&self, _coordinates: Coordinates) -> SearchResult {
        Ok(Vec::new())
    }
}

fn pittsburgh() -> Coordinates {
    Coordinates::new(40.4406, -79.9959).unwrap()
}

// ---------------------------------------------------------------------------
// ZIP search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn zip_search_with_results_ends_in_success() {
    let backend = StubBackend::new(|| Ok(vec![store("1", 5.2), store("2", 15.7)]));
    let search = StoreSearch::new(backend, FixedLocation::default());

    search.search_by_zip_code("15108").await;

    assert_eq!(
        search.state(),
        SearchState::Success(vec![store("1", 5.2), store("2", 15.7)])
    );
}

#[tokio::test]
async fn zip_search_passes_through_loading() {
    let (tx, rx) = oneshot::channel();
    let search = StoreSearch::new(GatedBackend::new([("15108", rx)]), FixedLocation::default());
    let mut states = search.subscribe();

    let run = search.search_by_zip_code("15108");
    let observe = async {
        states.wait_for(SearchState::is_loading).await.unwrap();
        tx.send(Ok(vec![store("1", 5.2)])).unwrap();
        states
            .wait_for(|s| matches!(s, SearchState::Success(_)))
            .await
            .unwrap();
    };
    tokio::join!(run, observe);

    assert_eq!(search.state(), SearchState::Success(vec![store("1", 5.2)]));
}

#[tokio::test]
async fn zip_search_with_no_results_ends_in_empty() {
    let search = StoreSearch::new(StubBackend::new(|| Ok(Vec::new())), FixedLocation::default());

    search.search_by_zip_code("00000").await;

    assert_eq!(search.state(), SearchState::Empty);
}

#[tokio::test]
async fn zip_search_failure_ends_in_error_with_description() {
    let search = StoreSearch::new(StubBackend::new(|| Err(server_error())), FixedLocation::default());

    search.search_by_zip_code("15108").await;

    assert_eq!(
        search.state(),
        SearchState::Error("Failed to load stores: API error: 500 Internal Server Error".to_string())
    );
}

#[tokio::test]
async fn blank_zip_is_a_no_op() {
    let search = StoreSearch::new(StubBackend::new(|| Ok(Vec::new())), FixedLocation::default());
    let states = search.subscribe();

    search.search_by_zip_code("").await;
    search.search_by_zip_code("   ").await;

    assert_eq!(search.state(), SearchState::Initial);
    assert!(!states.has_changed().unwrap());
    assert!(search.backend.calls().is_empty());
}

#[tokio::test]
async fn new_search_after_error_replaces_error() {
    let (tx_first, rx_first) = oneshot::channel();
    let (tx_second, rx_second) = oneshot::channel();
    tx_first.send(Err(server_error())).unwrap();
    tx_second.send(Ok(vec![store("1", 5.2)])).unwrap();
    let search = StoreSearch::new(
        GatedBackend::new([("11111", rx_first), ("22222", rx_second)]),
        FixedLocation::default(),
    );

    search.search_by_zip_code("11111").await;
    assert!(search.state().error_message().is_some());

    search.search_by_zip_code("22222").await;
    assert_eq!(search.state(), SearchState::Success(vec![store("1", 5.2)]));
}

// ---------------------------------------------------------------------------
// Location search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn location_search_uses_resolved_coordinates() {
    let backend = StubBackend::new(|| Ok(vec![store("7", 1.1)]));
    let search = StoreSearch::new(backend, FixedLocation::new(Some(pittsburgh())));

    search.search_by_current_location().await;

    assert_eq!(search.state(), SearchState::Success(vec![store("7", 1.1)]));
    assert_eq!(search.backend.calls(), vec!["loc:40.4406,-79.9959"]);
}

#[tokio::test]
async fn missing_location_ends_in_fixed_error() {
    let search = StoreSearch::new(StubBackend::new(|| Ok(Vec::new())), FixedLocation::default());

    search.search_by_current_location().await;

    assert_eq!(
        search.state(),
        SearchState::Error(
            "Could not determine your location. Please try again or search by ZIP code."
                .to_string()
        )
    );
    assert!(search.backend.calls().is_empty());
}

#[tokio::test]
async fn coordinate_search_bypasses_location_source() {
    let search = StoreSearch::new(StubBackend::new(|| Ok(Vec::new())), FixedLocation::default());

    search.search_by_coordinates(pittsburgh()).await;

    assert_eq!(search.state(), SearchState::Empty);
    assert_eq!(search.backend.calls(), vec!["loc:40.4406,-79.9959"]);
}

#[test]
fn location_permission_delegates_to_source() {
    let granted = StoreSearch::new(
        StubBackend::new(|| Ok(Vec::new())),
        FixedLocation::new(Some(pittsburgh())),
    );
    let denied = StoreSearch::new(StubBackend::new(|| Ok(Vec::new())), FixedLocation::default());

    assert!(granted.has_location_permission());
    assert!(!denied.has_location_permission());
}

// ---------------------------------------------------------------------------
// Pause and latest-wins
// ---------------------------------------------------------------------------

#[tokio::test]
async fn pause_after_success_resets_to_initial() {
    let search = StoreSearch::new(
        StubBackend::new(|| Ok(vec![store("1", 5.2)])),
        FixedLocation::default(),
    );
    search.search_by_zip_code("15108").await;
    assert!(matches!(search.state(), SearchState::Success(_)));

    search.on_pause();

    assert_eq!(search.state(), SearchState::Initial);
}

#[tokio::test]
async fn pause_discards_in_flight_result() {
    let (tx, rx) = oneshot::channel();
    let search = StoreSearch::new(GatedBackend::new([("15108", rx)]), FixedLocation::default());
    let mut states = search.subscribe();

    let run = search.search_by_zip_code("15108");
    let pause_then_release = async {
        states.wait_for(SearchState::is_loading).await.unwrap();
        search.on_pause();
        tx.send(Ok(vec![store("1", 5.2)])).unwrap();
    };
    tokio::join!(run, pause_then_release);

    assert_eq!(search.state(), SearchState::Initial);
}

#[tokio::test]
async fn stale_result_arriving_late_is_discarded() {
    let (tx_first, rx_first) = oneshot::channel();
    let (tx_second, rx_second) = oneshot::channel();
    let search = StoreSearch::new(
        GatedBackend::new([("11111", rx_first), ("22222", rx_second)]),
        FixedLocation::default(),
    );
    let mut states = search.subscribe();

    let first = search.search_by_zip_code("11111");
    let second = search.search_by_zip_code("22222");
    let release = async {
        tx_second.send(Ok(vec![store("second", 1.0)])).unwrap();
        states
            .wait_for(|s| matches!(s, SearchState::Success(_)))
            .await
            .unwrap();
        tx_first.send(Ok(vec![store("first", 2.0)])).unwrap();
    };
    tokio::join!(first, second, release);

    assert_eq!(search.state(), SearchState::Success(vec![store("second", 1.0)]));
}

#[tokio::test]
async fn stale_failure_arriving_early_keeps_newer_search_loading() {
    let (tx_first, rx_first) = oneshot::channel();
    let (tx_second, rx_second) = oneshot::channel();
    let search = StoreSearch::new(
        GatedBackend::new([("11111", rx_first), ("22222", rx_second)]),
        FixedLocation::default(),
    );

    let first = search.search_by_zip_code("11111");
    let second = search.search_by_zip_code("22222");
    let release = async {
        tx_first.send(Err(server_error())).unwrap();
        // Let the first search observe its result before releasing the second.
        tokio::task::yield_now().await;
        assert_eq!(search.state(), SearchState::Loading);
        tx_second.send(Ok(Vec::new())).unwrap();
    };
    tokio::join!(first, second, release);

    assert_eq!(search.state(), SearchState::Empty);
}

#[test]
fn failure_message_prefixes_description() {
    let message = failure_message(&LocatorError::Mapping {
        reason: "bad record".to_string(),
    });
    assert_eq!(
        message,
        "Failed to load stores: cannot map store record: bad record"
    );
}
