//! API server configuration

use config::{Config, ConfigError, Environment};

/// Default bind address of the HTTP server
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3002";

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub listen_addr: String,
}

impl ApiConfig {
    /// Create a new ApiConfig from environment variables
    ///
    /// # Environment Variables
    /// - `PARKING_LISTEN_ADDR`: Bind address (default: "0.0.0.0:3002")
    pub fn from_env() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("listen_addr", DEFAULT_LISTEN_ADDR)?
            .add_source(Environment::with_prefix("PARKING"))
            .build()?;

        Ok(Self {
            listen_addr: settings.get_string("listen_addr")?,
        })
    }
}
