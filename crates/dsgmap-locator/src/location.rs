//! Device location seam.

use std::future::Future;

use dsgmap_core::Coordinates;

/// Resolves the device's current position.
///
/// Implementations never fail to the caller: missing permission or a
/// platform error both come back as `None`.
pub trait LocationSource: Send + Sync {
    fn has_permission(&self) -> bool;

    fn current_location(&self) -> impl Future<Output = Option<Coordinates>> + Send;
}

/// A location source that always reports the same fix, or none at all.
///
/// Used by the CLI, where the "device" position comes from flags or env.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocation {
    coordinates: Option<Coordinates>,
}

impl FixedLocation {
    #[must_use]
    pub fn new(coordinates: Option<Coordinates>) -> Self {
        Self { coordinates }
    }
}

impl LocationSource for FixedLocation {
    /// Permission is modelled as "a fix was configured".
    fn has_permission(&self) -> bool {
        self.coordinates.is_some()
    }

    async fn current_location(&self) -> Option<Coordinates> {
        self.coordinates
    }
}
