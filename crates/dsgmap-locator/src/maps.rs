//! Map deep-links for a store.
//!
//! The preferred target is a `geo:` URI handled by a native map app; when
//! nothing accepts it, a web map search URL is tried instead. Failures are
//! logged and swallowed.

use dsgmap_core::Coordinates;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left unescaped in a geo URI label, matching the usual
/// URI-component encoders on mobile platforms.
const LABEL_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'-')
    .remove(b'!')
    .remove(b'.')
    .remove(b'~')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*');

const WEB_MAP_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

/// `geo:{lat},{lng}?q={lat},{lng}({name})` with the name percent-encoded.
#[must_use]
pub fn geo_uri(name: &str, coordinates: Coordinates) -> String {
    let label = utf8_percent_encode(name, LABEL_ENCODE_SET);
    format!("geo:{coordinates}?q={coordinates}({label})")
}

#[must_use]
pub fn web_fallback_url(coordinates: Coordinates) -> String {
    format!("{WEB_MAP_SEARCH_URL}{coordinates}")
}

#[derive(Debug, thiserror::Error)]
#[error("cannot open {uri}: {reason}")]
pub struct LaunchError {
    pub uri: String,
    pub reason: String,
}

/// Hands a URI to whatever the platform uses to open links.
pub trait MapLauncher {
    /// # Errors
    ///
    /// Returns [`LaunchError`] when no handler accepted the URI.
    fn open(&self, uri: &str) -> Result<(), LaunchError>;
}

/// Which link [`open_in_maps`] managed to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapTarget {
    App,
    Web,
}

/// Opens a store in a map app, falling back to the web map.
///
/// Returns `None` when neither link could be opened; the failure is not
/// surfaced any further.
pub fn open_in_maps<M: MapLauncher>(
    launcher: &M,
    name: &str,
    coordinates: Coordinates,
) -> Option<MapTarget> {
    let geo = geo_uri(name, coordinates);
    let app_error = match launcher.open(&geo) {
        Ok(()) => return Some(MapTarget::App),
        Err(e) => e,
    };

    let web = web_fallback_url(coordinates);
    match launcher.open(&web) {
        Ok(()) => {
            tracing::debug!(error = %app_error, "no map app; opened web map");
            Some(MapTarget::Web)
        }
        Err(web_error) => {
            tracing::warn!(
                app_error = %app_error,
                web_error = %web_error,
                "unable to open any map application"
            );
            None
        }
    }
}
