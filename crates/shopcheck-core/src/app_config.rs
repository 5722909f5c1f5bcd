use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Admin API version tried first; fallbacks are fixed in the probe crate.
    pub api_version: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Prefix for the title of the test price rule and its discount code.
    pub test_code_prefix: String,
}

impl AppConfig {
    /// Whether internal error details may be exposed to HTTP clients.
    #[must_use]
    pub fn is_development(&self) -> bool {
        self.env == Environment::Development
    }
}
