//! Centralized server configuration.
//!
//! Strongly-typed configuration loaded via the `config` crate from
//! environment variables (`DATABASE_URL`, `PROVIDER__URL`,
//! `PROVIDER__PUBLIC_KEY`, `COOKIES__SECURE`, ...).
//!
//! The identity provider section is optional by design: when it is absent the
//! edge-protection layer is disabled and every request passes through as
//! unauthenticated. That is a documented development-mode affordance, logged
//! loudly at startup; see [`crate::edge`].

use serde::Deserialize;

/// Server configuration composed from environment variables.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// PostgreSQL database connection URL.
    pub database_url: String,

    /// Address the HTTP server binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Identity provider configuration. Absent means the edge layer is
    /// disabled (fail-open to unauthenticated pass-through).
    #[serde(default)]
    pub provider: Option<ProviderConfig>,

    /// Session cookie configuration.
    #[serde(default)]
    pub cookies: CookieConfig,
}

/// Identity provider connection settings.
///
/// Both values are required for the edge layer to arm.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the identity provider.
    pub url: String,
    /// Public (anon) API key sent with every provider call.
    pub public_key: String,
}

/// Session cookie settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CookieConfig {
    /// Whether to set the Secure flag on cookies (requires HTTPS).
    /// Defaults to true for production safety; set to false for local HTTP
    /// development.
    #[serde(default = "default_secure_cookies")]
    pub secure: bool,

    /// Access token cookie lifetime in minutes.
    #[serde(default = "default_access_max_age_minutes")]
    pub access_max_age_minutes: i64,

    /// Refresh token cookie lifetime in days.
    #[serde(default = "default_refresh_max_age_days")]
    pub refresh_max_age_days: i64,
}

fn default_listen_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_secure_cookies() -> bool {
    true
}

fn default_access_max_age_minutes() -> i64 {
    60
}

fn default_refresh_max_age_days() -> i64 {
    30
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            secure: default_secure_cookies(),
            access_max_age_minutes: default_access_max_age_minutes(),
            refresh_max_age_days: default_refresh_max_age_days(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_config_has_production_defaults() {
        let config = CookieConfig::default();
        assert!(config.secure);
        assert_eq!(config.access_max_age_minutes, 60);
        assert_eq!(config.refresh_max_age_days, 30);
    }

    #[test]
    fn default_listen_addr_is_loopback() {
        assert_eq!(default_listen_addr(), "127.0.0.1:3000");
    }
}
