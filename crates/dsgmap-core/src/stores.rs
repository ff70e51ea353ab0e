use serde::Serialize;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Builds a coordinate pair, rejecting non-finite or out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when latitude is outside `[-90, 90]`
    /// or longitude is outside `[-180, 180]`.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, String> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(format!("latitude {latitude} is out of range"));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(format!("longitude {longitude} is out of range"));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Renders as `"{lat},{lng}"`, the form the store-search `addr` parameter
/// and geo URIs expect. Whole degrees keep their `.0` (`"40.0,-80.0"`).
impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?},{:?}", self.latitude, self.longitude)
    }
}

/// A store search result projected for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayStore {
    /// Vendor location identifier, `""` when the payload omits it.
    pub id: String,
    pub name: String,
    /// Distance from the search origin, in the units the API reported.
    pub distance: f64,
    /// `"City, ST"` or `"Unknown Location"`.
    pub location: String,
    /// Single-line street address or `"Unknown Address"`.
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl DisplayStore {
    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Lifecycle of a single store search as seen by a front end.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchState {
    #[default]
    Initial,
    Loading,
    /// Non-empty, sorted ascending by distance.
    Success(Vec<DisplayStore>),
    Empty,
    Error(String),
}

impl SearchState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading)
    }

    /// Stores carried by a `Success` state; empty for every other state.
    #[must_use]
    pub fn stores(&self) -> &[DisplayStore] {
        match self {
            SearchState::Success(stores) => stores,
            _ => &[],
        }
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            SearchState::Error(message) => Some(message),
            _ => None,
        }
    }
}
