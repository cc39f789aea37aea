//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `ASSISTANT_CORE` prefix and nested values use double underscores as separators.
//!
//! Per-tenant knobs (segmentation bounds, capture schema, phase policy,
//! formatter) live in tenant documents, not here.
//!
//! # Example
//!
//! ```no_run
//! use assistant_core::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;
mod features;
mod segmentation;
mod server;
mod tenants;

pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use segmentation::SegmentationDefaults;
pub use server::{Environment, ServerConfig};
pub use tenants::TenantsConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// development configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Default segmentation bounds
    #[serde(default)]
    pub segmentation: SegmentationDefaults,

    /// Tenant document location
    #[serde(default)]
    pub tenants: TenantsConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `ASSISTANT_CORE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `ASSISTANT_CORE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `ASSISTANT_CORE__SEGMENTATION__MAX_CHARS=160` -> `segmentation.max_chars = 160`
    /// - `ASSISTANT_CORE__TENANTS__DIRECTORY=/srv/tenants` -> `tenants.directory`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ASSISTANT_CORE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.segmentation.validate()?;
        self.tenants.validate()?;
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
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 6] = [
        "ASSISTANT_CORE__SERVER__PORT",
        "ASSISTANT_CORE__SERVER__ENVIRONMENT",
        "ASSISTANT_CORE__SEGMENTATION__MIN_CHARS",
        "ASSISTANT_CORE__SEGMENTATION__MAX_CHARS",
        "ASSISTANT_CORE__TENANTS__DIRECTORY",
        "ASSISTANT_CORE__FEATURES__ENABLE_WHATSAPP_FORMATTING",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.segmentation.max_chars, 200);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("ASSISTANT_CORE__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_custom_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("ASSISTANT_CORE__SERVER__PORT", "3000");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_segmentation_and_tenants_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("ASSISTANT_CORE__SEGMENTATION__MIN_CHARS", "80");
        env::set_var("ASSISTANT_CORE__SEGMENTATION__MAX_CHARS", "120");
        env::set_var("ASSISTANT_CORE__TENANTS__DIRECTORY", "/srv/tenants");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        let bounds = config.segmentation.to_config().unwrap();
        assert_eq!(bounds.min_chars(), 80);
        assert_eq!(bounds.max_chars(), 120);
        assert_eq!(config.tenants.directory, std::path::PathBuf::from("/srv/tenants"));
    }

    #[test]
    fn test_feature_flag_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("ASSISTANT_CORE__FEATURES__ENABLE_WHATSAPP_FORMATTING", "false");
        let result = AppConfig::load();
        clear_env();

        assert!(!result.unwrap().features.enable_whatsapp_formatting);
    }

    #[test]
    fn test_validate_rejects_inverted_segmentation_defaults() {
        let config = AppConfig {
            segmentation: SegmentationDefaults {
                min_chars: 250,
                max_chars: 200,
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidSegmentationBounds { .. })
        ));
    }
}
