use crate::api_version::{is_valid_api_version, DEFAULT_API_VERSION};
use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a usable config.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
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

    let env = parse_environment(&or_default("SHOPCHECK_ENV", "development"));
    let bind_addr = parse_addr("SHOPCHECK_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("SHOPCHECK_LOG_LEVEL", "info");

    let api_version = or_default("SHOPCHECK_API_VERSION", DEFAULT_API_VERSION);
    if !is_valid_api_version(&api_version) {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHOPCHECK_API_VERSION".to_string(),
            reason: format!("\"{api_version}\" is not a YYYY-MM release or \"unstable\""),
        });
    }

    let request_timeout_secs = parse_u64("SHOPCHECK_REQUEST_TIMEOUT_SECS", "10")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHOPCHECK_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least one second".to_string(),
        });
    }

    let user_agent = or_default("SHOPCHECK_USER_AGENT", "shopcheck/0.1 (integration-check)");
    let test_code_prefix = or_default("SHOPCHECK_TEST_CODE_PREFIX", "SHOPCHECK_TEST");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        api_version,
        request_timeout_secs,
        user_agent,
        test_code_prefix,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
