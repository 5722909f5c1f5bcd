pub mod api_version;
pub mod app_config;
pub mod config;

pub use api_version::{is_valid_api_version, DEFAULT_API_VERSION};
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
