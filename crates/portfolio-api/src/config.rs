//! Configuration management for the Portfolio API
//!
//! Loads configuration from environment variables with sensible defaults.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use crate::storage::{MemoryStore, RedisStore, SubmissionStore};

/// Where contact submissions are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Redis,
    /// Process-local, lost on restart
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(StorageBackend::Redis),
            "memory" => Ok(StorageBackend::Memory),
            other => anyhow::bail!(
                "Invalid STORAGE_BACKEND '{}' (expected redis or memory)",
                other
            ),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server host
    pub api_host: String,

    /// API server port
    pub api_port: u16,

    /// Redis connection URL
    pub redis_url: String,

    pub storage_backend: StorageBackend,

    /// Optional JSON file replacing the bundled portfolio content
    pub content_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Config {
            api_host: lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),

            api_port: lookup("API_PORT")
                .unwrap_or_else(|| "8001".to_string())
                .parse()
                .context("Invalid API_PORT")?,

            redis_url: lookup("REDIS_URL")
                .unwrap_or_else(|| "redis://127.0.0.1:6379".to_string()),

            storage_backend: lookup("STORAGE_BACKEND")
                .unwrap_or_else(|| "redis".to_string())
                .parse()?,

            content_path: lookup("PORTFOLIO_CONTENT_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        };

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.api_port == 0 {
            anyhow::bail!("API_PORT must be greater than 0");
        }

        if self.storage_backend == StorageBackend::Redis && self.redis_url.trim().is_empty() {
            anyhow::bail!("REDIS_URL must be set when STORAGE_BACKEND is redis");
        }

        Ok(())
    }

    /// Get the API server address
    pub fn api_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }

    /// Open the configured submission store
    pub async fn connect_store(&self) -> Result<Arc<dyn SubmissionStore>> {
        match self.storage_backend {
            StorageBackend::Redis => {
                let store = RedisStore::new(&self.redis_url)
                    .await
                    .context("Failed to initialize storage")?;
                Ok(Arc::new(store))
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; submissions are lost on restart");
                Ok(Arc::new(MemoryStore::new()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).expect("Failed to load config");

        assert_eq!(config.api_host, "0.0.0.0");
        assert_eq!(config.api_port, 8001);
        assert_eq!(config.redis_url, "redis://127.0.0.1:6379");
        assert_eq!(config.storage_backend, StorageBackend::Redis);
        assert!(config.content_path.is_none());
    }

    #[test]
    fn test_config_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("API_HOST", "127.0.0.1"),
            ("API_PORT", "9000"),
            ("STORAGE_BACKEND", "Memory"),
            ("PORTFOLIO_CONTENT_PATH", "/etc/portfolio.json"),
        ]))
        .unwrap();

        assert_eq!(config.api_address(), "127.0.0.1:9000");
        assert_eq!(config.storage_backend, StorageBackend::Memory);
        assert_eq!(
            config.content_path,
            Some(PathBuf::from("/etc/portfolio.json"))
        );
    }

    #[test]
    fn test_invalid_port() {
        let result = Config::from_lookup(lookup_from(&[("API_PORT", "0")]));
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("API_PORT must be greater than 0"));

        assert!(Config::from_lookup(lookup_from(&[("API_PORT", "http")])).is_err());
    }

    #[test]
    fn test_invalid_backend() {
        let result = Config::from_lookup(lookup_from(&[("STORAGE_BACKEND", "mongo")]));
        assert!(result.unwrap_err().to_string().contains("STORAGE_BACKEND"));
    }

    #[test]
    fn test_blank_content_path_ignored() {
        let config =
            Config::from_lookup(lookup_from(&[("PORTFOLIO_CONTENT_PATH", "  ")])).unwrap();
        assert!(config.content_path.is_none());
    }

    #[tokio::test]
    async fn test_connect_memory_store() {
        let config = Config::from_lookup(lookup_from(&[("STORAGE_BACKEND", "memory")])).unwrap();
        let store = config.connect_store().await.unwrap();
        store.health_check().await.unwrap();
    }
}
