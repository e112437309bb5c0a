//! Configuration loading and management
//!
//! Configuration is read from an optional YAML file and overridden by
//! environment variables, so a bare `DATABASE_URL` is enough to run.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_database_url() -> String {
    "postgres://localhost/biztime".to_string()
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// PostgreSQL connection string.
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            database_url: default_database_url(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path))?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load configuration for the current process.
    ///
    /// Starts from `BIZTIME_CONFIG` (a YAML file path) when set,
    /// otherwise from defaults, then applies `BIND_ADDR` and
    /// `DATABASE_URL` environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var("BIZTIME_CONFIG") {
            Ok(path) => Self::from_yaml_file(&path)?,
            Err(_) => Self::default(),
        };

        if let Ok(addr) = std::env::var("BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database_url = url;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.bind_addr, "127.0.0.1:3000");
        assert_eq!(config.database_url, "postgres://localhost/biztime");
    }

    #[test]
    fn test_from_yaml_str() {
        let config = AppConfig::from_yaml_str(
            "bind_addr: 0.0.0.0:8080\ndatabase_url: postgres://db/biztime_test\n",
        )
        .unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.database_url, "postgres://db/biztime_test");
    }

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        let config = AppConfig::from_yaml_str("bind_addr: 0.0.0.0:8080\n").unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.database_url, "postgres://localhost/biztime");
    }
}
