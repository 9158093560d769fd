//! Portal configuration: TOML file with environment-variable overrides.
//!
//! Precedence, lowest to highest: built-in defaults, `config.toml`,
//! `WELLPORT_*` environment variables, CLI flags (applied by `main`).

use std::path::Path;
use std::time::Duration;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::spiral::TagCase;

/// Errors from loading configuration.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config file: {path}")]
    #[diagnostic(
        code(wellport::config::read),
        help("Check the file exists and is readable, or pass --config with another path.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {path}")]
    #[diagnostic(
        code(wellport::config::parse),
        help("The file must be valid TOML; see the README for the accepted keys.")
    )]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Runtime configuration for the portal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Base URL of the well backend.
    pub base_url: String,
    /// Default well to show.
    pub well_id: String,
    /// `stage` string sent in the `/spiral` request body. The original
    /// portal always sends "reflect"; the backend accepts any string.
    pub spiral_stage: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Tag substring matching: sensitive (default) or insensitive.
    pub tag_case: TagCase,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            well_id: "WELL-001".to_string(),
            spiral_stage: "reflect".to_string(),
            timeout_secs: 10,
            tag_case: TagCase::Sensitive,
        }
    }
}

impl PortalConfig {
    /// Load from a TOML file; a missing file yields the defaults.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Apply `WELLPORT_BASE_URL` / `WELLPORT_WELL_ID` overrides.
    pub fn apply_env(mut self) -> Self {
        if let Ok(url) = std::env::var("WELLPORT_BASE_URL") {
            self.base_url = url;
        }
        if let Ok(id) = std::env::var("WELLPORT_WELL_ID") {
            self.well_id = id;
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
