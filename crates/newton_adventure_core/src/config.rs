//! Configuration for level export.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ExportError;

/// Configuration for [`LevelWriter`](crate::writer::LevelWriter).
///
/// Every field has a default matching what the game expects, so a config file
/// only needs to list what it changes.
///
/// # Example
///
/// ```rust
/// use newton_adventure_core::ExportConfig;
///
/// let config = ExportConfig::from_json_str(r#"{ "embedded_frame_duration": 500 }"#).unwrap();
/// assert_eq!(config.property_namespace, "newton_adventure");
/// assert_eq!(config.embedded_frame_duration, 500);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Prefix of every property the converters read (`<namespace>.platform.enabled`).
    pub property_namespace: String,

    /// Extension of the companion animation archive written next to the level.
    pub animation_extension: String,

    /// Duration of the single frame of an animation synthesized from a tile.
    pub embedded_frame_duration: i32,

    /// Accept kind and property spellings used by older exporters
    /// (`platfom`, `mumy`, `egyption_boss`, `teleporer.color`).
    pub legacy_names: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            property_namespace: "newton_adventure".to_string(),
            animation_extension: "nanim".to_string(),
            embedded_frame_duration: 1_000_000,
            legacy_names: true,
        }
    }
}

impl ExportConfig {
    /// Parse a config from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read a config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ExportError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ExportError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content).map_err(|source| ExportError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Full property key for `suffix` inside the configured namespace.
    pub fn key(&self, suffix: &str) -> String {
        format!("{}.{}", self.property_namespace, suffix)
    }
}
