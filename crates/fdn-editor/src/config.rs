//! Editor configuration (RON)

use std::path::Path;

use serde::{Deserialize, Serialize};

use fdn_core::constants::SNAP_POINT_THRESHOLD;

use crate::scene::ScenePalette;
use crate::settings::ToolSettings;

/// Persistent editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Format version
    pub version: u32,
    /// Tool panel values at startup
    pub tool_defaults: ToolSettings,
    /// Distance within which picks are pulled onto a snap point
    pub snap_point_threshold: f32,
    pub show_guide_lines: bool,
    pub palette: ScenePalette,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            version: 1,
            tool_defaults: ToolSettings::default(),
            snap_point_threshold: SNAP_POINT_THRESHOLD,
            show_guide_lines: true,
            palette: ScenePalette::default(),
        }
    }
}

impl EditorConfig {
    /// Serialize to pretty RON
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Parse from RON; missing fields take their defaults
    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        let mut config: EditorConfig =
            ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))?;
        config.tool_defaults = config.tool_defaults.clamped();
        Ok(config)
    }

    /// Save to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = self.to_ron()?;
        std::fs::write(path, content).map_err(|e| ConfigError::Io(e.to_string()))?;
        tracing::info!("Saved editor config to {}", path.display());
        Ok(())
    }

    /// Load from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_ron(&content)
    }

    /// Load from file, falling back to defaults when it is missing or invalid
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    "Using default config ({}): {}",
                    path.as_ref().display(),
                    e
                );
                Self::default()
            }
        }
    }
}

/// Config errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}
