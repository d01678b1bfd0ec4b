//! Configuration persistence for inkshot settings

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::store::record::DEFAULT_STROKE_WIDTH;

/// Style applied to newly drawn shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color for pen strokes and lines
    pub stroke_color: String,
    /// Stroke width in logical pixels
    pub stroke_width: f32,
    /// Fill color for rectangles and ellipses
    pub fill_color: String,
    /// Font size for detected-text labels
    pub font_size: f32,
    /// Foreground color for detected-text labels
    pub text_foreground: String,
    /// Background color for detected-text labels
    pub text_background: String,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            // Default red matching the classic annotation arrow color
            stroke_color: "#E61A1A".to_string(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            fill_color: "#000000".to_string(),
            font_size: 16.0,
            text_foreground: "#000000".to_string(),
            text_background: "#FFF3A0".to_string(),
        }
    }
}

/// Save location for captures (Pictures or Documents)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SaveLocation {
    #[default]
    Pictures,
    Documents,
}

/// Application configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InkshotConfig {
    /// Style for newly drawn shapes
    #[serde(default)]
    pub style: ShapeStyle,
    /// Where to save captured screenshots
    #[serde(default)]
    pub save_location: SaveLocation,
    /// File name of the annotation record inside the data folder
    #[serde(default = "default_record_file_name")]
    pub record_file_name: String,
    /// Language passed to the OCR backend
    #[serde(default = "default_ocr_language")]
    pub ocr_language: String,
}

fn default_record_file_name() -> String {
    "annotations.json".to_string()
}

fn default_ocr_language() -> String {
    "eng".to_string()
}

impl Default for InkshotConfig {
    fn default() -> Self {
        Self {
            style: ShapeStyle::default(),
            save_location: SaveLocation::default(),
            record_file_name: default_record_file_name(),
            ocr_language: default_ocr_language(),
        }
    }
}

impl InkshotConfig {
    /// Path of the config file under the platform config dir
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("inkshot").join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            log::warn!("No config directory available, using defaults");
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(config) => config,
                Err(err) => {
                    log::warn!("Error loading config, using defaults: {err:?}");
                    Self::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(err) => {
                log::warn!("Could not read config file, using defaults: {err:?}");
                Self::default()
            }
        }
    }

    /// Save configuration to disk
    pub fn save(&self) {
        let Some(path) = Self::config_path() else {
            log::error!("No config directory available, config not saved");
            return;
        };
        let result = (|| -> anyhow::Result<()> {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_string_pretty(self)?;
            std::fs::write(&path, json)?;
            Ok(())
        })();
        if let Err(err) = result {
            log::error!("Failed to save config: {err:?}");
        }
    }

    /// Path of the annotation record inside the platform data dir
    pub fn record_path(&self) -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("inkshot").join(&self.record_file_name))
    }

    /// Path of the recent-captures list inside the platform data dir
    pub fn recent_captures_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("inkshot").join("recent.txt"))
    }
}

/// Resolve the folder captures are saved into, with home-dir fallbacks
pub fn storage_folder(location: SaveLocation) -> Option<PathBuf> {
    match location {
        SaveLocation::Pictures => {
            dirs::picture_dir().or_else(|| dirs::home_dir().map(|h| h.join("Pictures")))
        }
        SaveLocation::Documents => {
            dirs::document_dir().or_else(|| dirs::home_dir().map(|h| h.join("Documents")))
        }
    }
}

/// Timestamped file name for a new capture
pub fn capture_file_name() -> String {
    chrono::Local::now()
        .format("Screenshot_%Y-%m-%d_%H-%M-%S.png")
        .to_string()
}

/// Full path for a new capture in the configured save folder
pub fn capture_file_path(location: SaveLocation) -> Option<PathBuf> {
    let mut path = storage_folder(location)?;
    path.push(capture_file_name());
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style_matches_record_defaults() {
        let style = ShapeStyle::default();
        assert_eq!(style.stroke_width, DEFAULT_STROKE_WIDTH);
        assert!(!style.stroke_color.is_empty());
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let mut config = InkshotConfig::default();
        config.save_location = SaveLocation::Documents;
        config.style.stroke_color = "#1A66E6".to_string();

        let json = serde_json::to_string(&config).unwrap();
        let restored: InkshotConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, config);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: InkshotConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, InkshotConfig::default());
        assert_eq!(config.record_file_name, "annotations.json");
        assert_eq!(config.ocr_language, "eng");
    }

    #[test]
    fn test_capture_file_name_format() {
        let name = capture_file_name();
        assert!(name.starts_with("Screenshot_"));
        assert!(name.ends_with(".png"));
        assert_eq!(name.len(), "Screenshot_2024-01-01_00-00-00.png".len());
    }
}
