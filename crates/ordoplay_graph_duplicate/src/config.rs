// SPDX-License-Identifier: MIT OR Apache-2.0
//! Duplication settings.

use ordoplay_graph::Delta;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Current settings format version
pub const CONFIG_FORMAT_VERSION: u32 = 1;

/// Offset applied when pasting without a drop location
pub const DEFAULT_PASTE_OFFSET: Delta = Delta::new(20, 20);

/// Settings applied by [`crate::DuplicateCommand`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuplicationConfig {
    /// Format version
    pub version: u32,
    /// Offset used when neither a drop location nor an explicit offset is given
    pub default_offset: Delta,
    /// Separator between a name and its uniquifying counter
    pub name_separator: String,
    /// Whether the duplicated nodes become the selection
    pub select_result: bool,
}

impl Default for DuplicationConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_FORMAT_VERSION,
            default_offset: DEFAULT_PASTE_OFFSET,
            name_separator: "_".to_string(),
            select_result: true,
        }
    }
}

impl DuplicationConfig {
    /// Parse settings from RON text
    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        let config: DuplicationConfig = ron::from_str(content)?;

        if config.version > CONFIG_FORMAT_VERSION {
            return Err(ConfigError::UnsupportedVersion(config.version));
        }

        Ok(config)
    }

    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_ron_str(&content)
    }

    /// Save settings to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let config = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);
        let content = ron::ser::to_string_pretty(self, config)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Error when loading or saving settings
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File access failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Text could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Settings could not be written
    #[error("Serialization error: {0}")]
    Serialize(#[from] ron::Error),

    /// File was written by a newer version
    #[error("Settings version {0} is newer than supported version {CONFIG_FORMAT_VERSION}")]
    UnsupportedVersion(u32),
}
