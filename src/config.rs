//! Configuration types for transfer operations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// What to do when a downloaded part fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecodeFailure {
    /// Fail the transfer on the first bad part.
    #[default]
    Abort,
    /// Log the bad part and keep fetching. The assembled file may come up
    /// short; the shortfall is logged, not returned as an error.
    SkipPart,
}

/// Configuration for upload and download operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    /// Policy applied when a downloaded part fails to decode.
    pub decode_failure: DecodeFailure,
    /// Whether to overwrite existing files when saving a download.
    pub force_overwrite: bool,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            decode_failure: DecodeFailure::Abort,
            force_overwrite: false,
        }
    }
}

impl TransferConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the decode-failure policy.
    #[must_use]
    pub const fn with_decode_failure(mut self, policy: DecodeFailure) -> Self {
        self.decode_failure = policy;
        self
    }

    /// Sets whether to overwrite existing files when saving a download.
    #[must_use]
    pub const fn with_force_overwrite(mut self, force: bool) -> Self {
        self.force_overwrite = force;
        self
    }
}

/// Complete application configuration, loadable from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the part-exchange server.
    pub server: String,
    /// Directory where downloaded files are saved.
    pub download_dir: PathBuf,
    /// Transfer behavior settings.
    pub transfer: TransferConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: "http://localhost:8000".to_string(),
            download_dir: PathBuf::from("."),
            transfer: TransferConfig::default(),
        }
    }
}

impl AppConfig {
    /// Creates a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the path of the user's configuration file.
    #[must_use]
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("bytelift")
            .join("config.toml")
    }

    /// Loads configuration from the user's config file, falling back to
    /// defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from an explicit path, falling back to defaults
    /// when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let config = toml::from_str(&contents)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }
}
