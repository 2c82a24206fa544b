//! Server configuration

use serde::Deserialize;

/// Runtime configuration for the matching API server
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Interface the server binds to
    pub host: String,
    /// Port the server listens on
    pub port: u16,
    /// Secret used to sign and verify client and lawyer tokens
    pub jwt_secret: String,
    /// Token lifetime in seconds
    pub jwt_expiration_secs: u64,
    /// Default log filter when RUST_LOG is not set
    pub log_level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: 3600,
            log_level: "info".to_string(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_`-prefixed environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the `host:port` address to bind
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
