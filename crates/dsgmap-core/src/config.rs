use crate::app_config::AppConfig;
use crate::stores::Coordinates;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        match lookup(var) {
            Ok(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(ConfigError::MissingEnvVar(var.to_string())),
        }
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_f64 = |var: &str| -> Result<Option<f64>, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: e.to_string(),
                }),
            Err(_) => Ok(None),
        }
    };

    let api_key = require("DSGMAP_API_KEY")?;
    let api_base_url = require("DSGMAP_API_BASE_URL")?;

    let log_level = or_default("DSGMAP_LOG_LEVEL", "info");
    let lob = or_default("DSGMAP_LOB", "dsg");
    let search_radius = parse_u32("DSGMAP_SEARCH_RADIUS", "100")?;
    let request_timeout_secs = parse_u64("DSGMAP_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("DSGMAP_USER_AGENT", "dsgmap/0.1 (store-locator)");

    let device_location = match (
        parse_f64("DSGMAP_LATITUDE")?,
        parse_f64("DSGMAP_LONGITUDE")?,
    ) {
        (Some(latitude), Some(longitude)) => Some(
            Coordinates::new(latitude, longitude).map_err(|reason| {
                ConfigError::InvalidEnvVar {
                    var: "DSGMAP_LATITUDE/DSGMAP_LONGITUDE".to_string(),
                    reason,
                }
            })?,
        ),
        (None, None) => None,
        (Some(_), None) => {
            return Err(ConfigError::MissingEnvVar("DSGMAP_LONGITUDE".to_string()));
        }
        (None, Some(_)) => {
            return Err(ConfigError::MissingEnvVar("DSGMAP_LATITUDE".to_string()));
        }
    };

    Ok(AppConfig {
        log_level,
        api_key,
        api_base_url,
        lob,
        search_radius,
        request_timeout_secs,
        user_agent,
        device_location,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
