//! Configuration management for the Fitness Admin backend
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: FA__)

use anyhow::Result;
use fitness_admin_shared::ReconcilePolicy;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub api: UpstreamApiConfig,
    #[serde(default)]
    pub progress: ProgressConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// External fitness REST API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl UpstreamApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Workout progress reconciliation behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressConfig {
    /// Refuse to wipe recorded progress when the routine day has no exercises
    pub reject_empty_routine: bool,
    /// Write reconciled documents back when the routine changed
    pub persist_on_reconcile: bool,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            reject_empty_routine: false,
            persist_on_reconcile: true,
        }
    }
}

impl ProgressConfig {
    pub fn policy(&self) -> ReconcilePolicy {
        ReconcilePolicy {
            reject_empty_routine: self.reject_empty_routine,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            api: UpstreamApiConfig {
                base_url: "http://localhost:5000/api".to_string(),
                timeout_secs: 15,
            },
            progress: ProgressConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with FA__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Load from environment-specific config file
            .add_source(config::File::with_name(&config_file).required(false))
            // Override with environment variables (FA__ prefix)
            // e.g., FA__API__BASE_URL=https://api.example.com sets api.base_url
            .add_source(config::Environment::with_prefix("FA").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }

    /// Problems that make the configuration unusable
    pub fn validation_errors(&self) -> Vec<&'static str> {
        let mut errors = Vec::new();
        if self.api.base_url.trim().is_empty() {
            errors.push("api.base_url must be set");
        }
        if self.api.timeout_secs == 0 {
            errors.push("api.timeout_secs must be greater than zero");
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.api.timeout(), Duration::from_secs(15));
        assert!(config.progress.persist_on_reconcile);
        assert!(!config.progress.policy().reject_empty_routine);
        assert!(config.validation_errors().is_empty());
    }

    #[test]
    fn test_validation_errors() {
        let mut config = AppConfig::default();
        config.api.base_url = " ".to_string();
        config.api.timeout_secs = 0;
        assert_eq!(config.validation_errors().len(), 2);
    }

    #[test]
    fn test_is_production() {
        // Default should be false (development)
        assert!(!AppConfig::is_production());
    }
}
