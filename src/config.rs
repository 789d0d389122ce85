//! Demo configuration persistence
//!
//! Stores sheet options and demo scene settings in
//! `~/.config/slide-sheet/config.yaml`. Every field is optional.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sheet::SheetOptions;
use crate::theme::PaletteData;

/// Initial window size in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 420,
            height: 780,
        }
    }
}

/// Shape of the demo scene, in logical pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub app_bar_height: f32,
    pub handle_height: f32,
    pub title_height: f32,
    pub sheet_padding: f32,
    pub list_items: usize,
    pub item_height: f32,
    /// Rows of the list visible while collapsed
    pub peek_items: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            app_bar_height: 56.0,
            handle_height: 24.0,
            title_height: 40.0,
            sheet_padding: 8.0,
            list_items: 40,
            item_height: 48.0,
            peek_items: 3,
        }
    }
}

/// Everything read from `config.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    pub sheet: SheetOptions,
    pub window: WindowConfig,
    pub scene: SceneConfig,
    pub colors: PaletteData,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            sheet: SheetOptions {
                use_scrim: true,
                ..SheetOptions::default()
            },
            window: WindowConfig::default(),
            scene: SceneConfig::default(),
            colors: PaletteData::default(),
        }
    }
}

impl SheetConfig {
    /// Load config from the default location, or return defaults
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`; missing or unreadable files yield defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to `path`, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
