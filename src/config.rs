//! Configuration management for sloany.
//!
//! Handles loading configuration from a TOML file and environment variables.
//! Everything has a sensible default, so the tool runs with no config file at
//! all.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, SloanyError};
use crate::skyserver::{DEFAULT_SKYSERVER_URL, DEFAULT_TIMEOUT_SECS};
use crate::spectra::DEFAULT_SAS_BASE_URL;

/// Main configuration structure for sloany.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Query endpoint configuration.
    #[serde(default)]
    pub skyserver: SkyServerConfig,

    /// Spectrum download configuration.
    #[serde(default)]
    pub spectra: SpectraConfig,
}

/// SkyServer query endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkyServerConfig {
    /// SQL search endpoint URL.
    #[serde(default = "default_skyserver_url")]
    pub url: String,

    /// HTTP timeout for query submission, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SkyServerConfig {
    fn default() -> Self {
        Self {
            url: default_skyserver_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Spectrum download configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpectraConfig {
    /// Science Archive Server base URL the candidate paths hang off.
    #[serde(default = "default_sas_base_url")]
    pub base_url: String,

    /// HTTP timeout per download attempt, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SpectraConfig {
    fn default() -> Self {
        Self {
            base_url: default_sas_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_skyserver_url() -> String {
    DEFAULT_SKYSERVER_URL.to_string()
}

fn default_sas_base_url() -> String {
    DEFAULT_SAS_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Config {
    /// Returns the default config file path.
    ///
    /// `~/.config/sloany/config.toml` on Linux, or the platform equivalent.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("sloany")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file.
    ///
    /// A missing file yields the defaults; a present-but-invalid file is a
    /// configuration error.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            SloanyError::config(format!("could not read {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&contents).map_err(|e| {
            SloanyError::config(format!("could not parse {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `SLOANY_*` environment variables over the file values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("SLOANY_SKYSERVER_URL") {
            self.skyserver.url = url;
        }
        if let Ok(url) = std::env::var("SLOANY_SAS_BASE_URL") {
            self.spectra.base_url = url;
        }
        if let Ok(secs) = std::env::var("SLOANY_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                self.skyserver.timeout_secs = secs;
                self.spectra.timeout_secs = secs;
            }
        }
    }

    /// Overrides both timeouts, e.g. from a CLI flag.
    pub fn set_timeout_secs(&mut self, secs: u64) {
        self.skyserver.timeout_secs = secs;
        self.spectra.timeout_secs = secs;
    }

    /// Validates that the configured endpoints are well-formed URLs.
    pub fn validate(&self) -> Result<()> {
        for (what, url) in [
            ("skyserver.url", &self.skyserver.url),
            ("spectra.base_url", &self.spectra.base_url),
        ] {
            Url::parse(url)
                .map_err(|e| SloanyError::config(format!("invalid {what} '{url}': {e}")))?;
        }
        Ok(())
    }

    /// Query submission timeout.
    pub fn skyserver_timeout(&self) -> Duration {
        Duration::from_secs(self.skyserver.timeout_secs)
    }

    /// Per-download timeout.
    pub fn spectra_timeout(&self) -> Duration {
        Duration::from_secs(self.spectra.timeout_secs)
    }
}
