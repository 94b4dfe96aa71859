use std::path::{Path, PathBuf};

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::PaintResult;
use crate::export::ExportFormat;
use crate::tools::ToolSettings;

/// Environment variable pointing at a JSON config file.
pub const CONFIG_ENV_VAR: &str = "SKETCH_CONFIG";

/// Startup configuration for a drawing session.
///
/// Nothing here is written back: tool changes made in the UI last only as long
/// as the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing fields fall back to defaults
pub struct PaintConfig {
    pub brush: ToolSettings,
    pub eraser_size: u32,
    /// Canvas background. The eraser paints with this color.
    pub background: Color32,
    /// Maximum number of snapshots kept in history. `None` keeps everything.
    pub history_limit: Option<usize>,
    pub export_dir: PathBuf,
    pub default_filename: String,
    pub default_format: ExportFormat,
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self {
            brush: ToolSettings::new(10, Color32::BLACK, 1.0),
            eraser_size: 20,
            background: Color32::WHITE,
            history_limit: None,
            export_dir: PathBuf::from("."),
            default_filename: "drawing".to_owned(),
            default_format: ExportFormat::Png,
        }
    }
}

impl PaintConfig {
    pub fn from_json_str(json: &str) -> PaintResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> PaintResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads the file named by [`CONFIG_ENV_VAR`], or the defaults if it is unset.
    pub fn from_env() -> PaintResult<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn eraser(&self) -> ToolSettings {
        ToolSettings::new(self.eraser_size, self.background, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_tool_presets() {
        let config = PaintConfig::default();
        assert_eq!(config.brush.size(), 10);
        assert_eq!(config.brush.color(), Color32::BLACK);
        assert_eq!(config.eraser().size(), 20);
        assert_eq!(config.eraser().color(), Color32::WHITE);
        assert_eq!(config.history_limit, None);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = PaintConfig::from_json_str(r#"{ "history_limit": 25, "eraser_size": 40 }"#).unwrap();
        assert_eq!(config.history_limit, Some(25));
        assert_eq!(config.eraser_size, 40);
        assert_eq!(config.default_filename, "drawing");
        assert_eq!(config.default_format, ExportFormat::Png);
    }

    #[test]
    fn test_out_of_range_brush_is_clamped() {
        let config = PaintConfig::from_json_str(r#"{ "brush": { "size": 0, "opacity": 7 } }"#).unwrap();
        assert_eq!(config.brush.size(), 1);
        assert_eq!(config.brush.opacity(), 1.0);
        assert_eq!(config.brush.color(), Color32::BLACK);
    }

    #[test]
    fn test_format_accepts_aliases() {
        let config = PaintConfig::from_json_str(r#"{ "default_format": "image/jpeg" }"#).unwrap();
        assert_eq!(config.default_format, ExportFormat::Jpeg);
        let config = PaintConfig::from_json_str(r#"{ "default_format": "JPG" }"#).unwrap();
        assert_eq!(config.default_format, ExportFormat::Jpeg);

        assert!(PaintConfig::from_json_str(r#"{ "default_format": "gif" }"#).is_err());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(PaintConfig::from_json_str("{ history_limit: ").is_err());
    }
}
