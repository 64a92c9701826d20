//! Configuration management for the Reservation Service
//!
//! Loads configuration from environment variables with sensible defaults.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server host
    pub api_host: String,

    /// API server port
    pub api_port: u16,

    /// JSON file replacing the built-in restaurant catalog
    pub catalog_path: Option<PathBuf>,

    /// Mail relay endpoint; notifications are only logged when unset
    pub notify_webhook_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenvy::dotenv().ok();

        let config = Config {
            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),

            api_port: env::var("API_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .context("Invalid API_PORT")?,

            catalog_path: non_empty_var("CATALOG_PATH").map(PathBuf::from),

            notify_webhook_url: non_empty_var("NOTIFY_WEBHOOK_URL"),
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.api_port == 0 {
            anyhow::bail!("API_PORT must be greater than 0");
        }

        if let Some(url) = &self.notify_webhook_url {
            let parsed = reqwest::Url::parse(url).context("Invalid NOTIFY_WEBHOOK_URL")?;
            if !matches!(parsed.scheme(), "http" | "https") || !parsed.has_host() {
                anyhow::bail!("NOTIFY_WEBHOOK_URL must be an http(s) URL");
            }
        }

        Ok(())
    }

    /// Get the API server address
    pub fn api_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            api_host: "127.0.0.1".to_string(),
            api_port: 9000,
            catalog_path: None,
            notify_webhook_url: None,
        }
    }

    #[test]
    fn test_api_address() {
        assert_eq!(config().api_address(), "127.0.0.1:9000");
    }

    #[test]
    fn test_validate_invalid_port() {
        let config = Config {
            api_port: 0,
            ..config()
        };

        let result = config.validate();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("API_PORT must be greater than 0"));
    }

    #[test]
    fn test_validate_webhook_url() {
        for url in [
            "smtp.example.com",
            "smtp://relay.example.com",
            "http://",
            "https://relay example.com/send",
            "https://[::1/send",
        ] {
            let bad = Config {
                notify_webhook_url: Some(url.to_string()),
                ..config()
            };
            assert!(bad.validate().is_err(), "{url} should be rejected");
        }

        let good = Config {
            notify_webhook_url: Some("https://relay.example.com/send".to_string()),
            ..config()
        };
        assert!(good.validate().is_ok());
    }
}
