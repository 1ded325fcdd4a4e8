//! TOML loading and saving for stream settings.

use crate::config::StreamConfig;
use crate::error::{Error, Result};
use std::path::Path;

impl StreamConfig {
    /// Parse settings from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|source| Error::ConfigParse { source })
    }

    /// Render settings as TOML text.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|source| Error::ConfigSerialize { source })
    }
}

/// Load stream settings from a TOML file.
pub fn load_stream_config(path: &Path) -> Result<StreamConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    StreamConfig::from_toml_str(&contents)
}

/// Save stream settings to a TOML file.
pub fn save_stream_config(config: &StreamConfig, path: &Path) -> Result<()> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::ConfigWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    std::fs::write(path, config.to_toml_string()?).map_err(|e| Error::ConfigWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
