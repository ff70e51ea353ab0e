pub mod app_config;
pub mod config;
pub mod stores;
pub mod zip;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use stores::{Coordinates, DisplayStore, SearchState};
pub use zip::is_valid_zip_code;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
