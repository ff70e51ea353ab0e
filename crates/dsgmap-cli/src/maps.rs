//! `map-link` command handler.

use std::process::Command;

use dsgmap_core::Coordinates;
use dsgmap_locator::{geo_uri, open_in_maps, web_fallback_url, LaunchError, MapLauncher, MapTarget};

/// Opens URIs with the desktop's default handler.
struct SystemLauncher;

impl MapLauncher for SystemLauncher {
    fn open(&self, uri: &str) -> Result<(), LaunchError> {
        let opener = if cfg!(target_os = "macos") {
            "open"
        } else {
            "xdg-open"
        };

        let status = Command::new(opener).arg(uri).status().map_err(|e| LaunchError {
            uri: uri.to_owned(),
            reason: format!("{opener}: {e}"),
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(LaunchError {
                uri: uri.to_owned(),
                reason: format!("{opener} exited with {status}"),
            })
        }
    }
}

/// Prints the geo URI and web fallback, or opens them when `open` is set.
///
/// # Errors
///
/// Returns an error only for out-of-range coordinates. Failing to open a map
/// is reported on stderr, not as an error.
pub(crate) fn run_map_link(name: &str, lat: f64, lng: f64, open: bool) -> anyhow::Result<()> {
    let coordinates = Coordinates::new(lat, lng).map_err(anyhow::Error::msg)?;

    if !open {
        println!("{}", geo_uri(name, coordinates));
        println!("{}", web_fallback_url(coordinates));
        return Ok(());
    }

    match open_in_maps(&SystemLauncher, name, coordinates) {
        Some(MapTarget::App) => tracing::info!("opened map app"),
        Some(MapTarget::Web) => tracing::info!("opened web map"),
        None => eprintln!("Unable to open a map for {name}"),
    }
    Ok(())
}
