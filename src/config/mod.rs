//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `HEREAFTER` prefix and
//! `__` between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use hereafter_pal::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod auth;
mod database;
mod error;
mod media;
mod payment;
mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use media::MediaConfig;
pub use payment::PaymentConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`], then check with [`AppConfig::validate()`].
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, base URL)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Bearer token validation
    pub auth: AuthConfig,

    /// Payment configuration (PayMongo)
    pub payment: PaymentConfig,

    /// Media CDN configuration
    #[serde(default)]
    pub media: MediaConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `HEREAFTER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `HEREAFTER__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `HEREAFTER__PAYMENT__SECRET_KEY=sk_test_...` -> `payment.secret_key`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("HEREAFTER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Checks URL formats, pool sizes, key prefixes and production
    /// requirements such as an HTTPS base URL.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.payment.validate()?;
        self.media.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global; serialize the tests that touch them.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[(&str, &str)] = &[
        ("HEREAFTER__DATABASE__URL", "postgresql://test@localhost/test"),
        ("HEREAFTER__AUTH__JWT_SECRET", "0123456789abcdef0123456789abcdef"),
        ("HEREAFTER__PAYMENT__SECRET_KEY", "sk_test_xxx"),
        ("HEREAFTER__PAYMENT__WEBHOOK_SECRET", "whsk_xxx"),
    ];

    fn set_minimal_env() {
        for (key, value) in VARS {
            env::set_var(key, value);
        }
    }

    fn clear_env() {
        for (key, _) in VARS {
            env::remove_var(key);
        }
        env::remove_var("HEREAFTER__SERVER__PORT");
        env::remove_var("HEREAFTER__SERVER__ENVIRONMENT");
        env::remove_var("HEREAFTER__MEDIA__CLOUD_NAME");
    }

    fn load_with(extra: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        set_minimal_env();
        for (key, value) in extra {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        clear_env();
        result
    }

    #[test]
    fn test_load_from_environment() {
        let config = load_with(&[]).expect("config loads");

        assert_eq!(config.database.url.expose_secret(), "postgresql://test@localhost/test");
        assert_eq!(config.payment.secret_key.expose_secret(), "sk_test_xxx");
        assert_eq!(config.auth.audience, "authenticated");
        assert_eq!(config.payment.webhook_tolerance_secs, 300);
        assert!(config.media.cloud_name.is_none());
    }

    #[test]
    fn test_validate_full_config() {
        let config = load_with(&[]).expect("config loads");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_defaults() {
        let config = load_with(&[]).expect("config loads");

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
    }

    #[test]
    fn test_is_production() {
        let config = load_with(&[("HEREAFTER__SERVER__ENVIRONMENT", "production")])
            .expect("config loads");
        assert!(config.is_production());
    }

    #[test]
    fn test_custom_server_port() {
        let config = load_with(&[("HEREAFTER__SERVER__PORT", "3000")]).expect("config loads");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_media_section_is_read() {
        let config = load_with(&[("HEREAFTER__MEDIA__CLOUD_NAME", "hereafter")])
            .expect("config loads");
        assert_eq!(config.media.cloud_name.as_deref(), Some("hereafter"));
    }
}
