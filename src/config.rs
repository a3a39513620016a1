//! Runtime configuration.
//!
//! Values come from three layers, later wins: built-in defaults, an
//! optional `brujula.toml` next to the working directory, environment
//! variables (`BRUJULA_*` plus `GEMINI_API_KEY` for the proxy). A
//! `.env` file is honoured via `dotenvy` before the environment is
//! read.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:8787/api/gemini";
const DEFAULT_PORT: u16 = 8787;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// File name searched in the working directory.
pub const CONFIG_FILE: &str = "brujula.toml";

/// Optional file-backed settings; every field falls back to a default.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    gateway_url: Option<String>,
    port: Option<u16>,
    timeout_secs: Option<u64>,
}

/// Resolved configuration for both subcommands.
#[derive(Debug, Clone)]
pub struct Config {
    /// Proxy endpoint the chat client talks to.
    pub gateway_url: String,
    /// Port `brujula serve` binds on.
    pub port: u16,
    /// Per-request deadline for the generation call.
    pub timeout: Duration,
    /// Vendor credential; only the proxy reads it.
    pub api_key: Option<String>,
}

impl Config {
    /// Load configuration from `dir`, applying env overrides.
    pub fn load(dir: &Path) -> Result<Self> {
        // A missing .env is fine; only read errors matter.
        let _ = dotenvy::dotenv();

        let file = Self::read_file(&dir.join(CONFIG_FILE))?;

        let gateway_url = std::env::var("BRUJULA_GATEWAY_URL")
            .ok()
            .or(file.gateway_url)
            .unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string());

        let port = match std::env::var("BRUJULA_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("BRUJULA_PORT is not a valid port: {raw}"))?,
            Err(_) => file.port.unwrap_or(DEFAULT_PORT),
        };

        let timeout_secs = match std::env::var("BRUJULA_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("BRUJULA_TIMEOUT_SECS is not a number: {raw}"))?,
            Err(_) => file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        };

        let api_key = std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty());

        Ok(Self {
            gateway_url,
            port,
            timeout: Duration::from_secs(timeout_secs),
            api_key,
        })
    }

    fn read_file(path: &Path) -> Result<FileConfig> {
        if !path.exists() {
            return Ok(FileConfig::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    // Env-var reads make these tests order-sensitive; the BRUJULA_*
    // variables are only set in the one test that needs them and
    // removed before it returns.

    #[test]
    fn test_defaults_without_file_or_env() {
        let dir = tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.gateway_url, DEFAULT_GATEWAY_URL);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_file_values_override_defaults() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "gateway_url = \"http://example.com/api/gemini\"\nport = 9000\ntimeout_secs = 5\n",
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.gateway_url, "http://example.com/api/gemini");
        assert_eq!(config.port, 9000);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "port = 9100\n").unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.gateway_url, DEFAULT_GATEWAY_URL);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "port = \"not a number\"\n").unwrap();

        let result = Config::load(dir.path());
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse config file")
        );
    }
}
