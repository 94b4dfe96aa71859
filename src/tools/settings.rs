use egui::Color32;
use serde::{Deserialize, Serialize};

use super::ToolKind;
use crate::surface::StrokeStyle;

/// Size, color and opacity for one tool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredToolSettings")]
pub struct ToolSettings {
    size: u32,
    color: Color32,
    opacity: f32,
}

/// Settings as written in a config file, before clamping.
#[derive(Deserialize)]
#[serde(default)]
struct StoredToolSettings {
    size: u32,
    color: Color32,
    opacity: f32,
}

impl Default for StoredToolSettings {
    fn default() -> Self {
        Self {
            size: 10,
            color: Color32::BLACK,
            opacity: 1.0,
        }
    }
}

impl From<StoredToolSettings> for ToolSettings {
    fn from(stored: StoredToolSettings) -> Self {
        Self::new(stored.size, stored.color, stored.opacity)
    }
}

impl ToolSettings {
    pub fn new(size: u32, color: Color32, opacity: f32) -> Self {
        Self {
            size: size.max(1),
            color,
            opacity: opacity.clamp(0.0, 1.0),
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Opacity as the 0–100 value shown on the slider.
    pub fn opacity_percent(&self) -> u8 {
        (self.opacity * 100.0).round() as u8
    }

    pub fn set_size(&mut self, size: u32) {
        self.size = size.max(1);
    }

    pub fn set_color(&mut self, color: Color32) {
        self.color = color;
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn set_opacity_percent(&mut self, percent: u8) {
        self.set_opacity(f32::from(percent.min(100)) / 100.0);
    }

    pub fn style(&self) -> StrokeStyle {
        StrokeStyle {
            color: self.color,
            width: self.size as f32,
            opacity: self.opacity,
        }
    }
}

/// The current tool plus the brush and eraser settings records.
///
/// Shapes draw with the brush settings. The eraser always paints the
/// background color at full opacity; only its size is adjustable.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolBox {
    current: ToolKind,
    brush: ToolSettings,
    eraser: ToolSettings,
}

impl ToolBox {
    pub fn new(brush: ToolSettings, eraser: ToolSettings) -> Self {
        Self {
            current: ToolKind::default(),
            brush,
            eraser,
        }
    }

    pub fn current(&self) -> ToolKind {
        self.current
    }

    pub fn set_current(&mut self, kind: ToolKind) {
        if self.current != kind {
            log::debug!("Tool changed: {} -> {}", self.current.name(), kind.name());
        }
        self.current = kind;
    }

    pub fn brush(&self) -> &ToolSettings {
        &self.brush
    }

    pub fn eraser(&self) -> &ToolSettings {
        &self.eraser
    }

    /// The settings record the current tool draws with.
    pub fn active_settings(&self) -> &ToolSettings {
        match self.current {
            ToolKind::Eraser => &self.eraser,
            ToolKind::Brush | ToolKind::Rectangle | ToolKind::Circle => &self.brush,
        }
    }

    pub fn set_size(&mut self, size: u32) {
        match self.current {
            ToolKind::Eraser => self.eraser.set_size(size),
            ToolKind::Brush | ToolKind::Rectangle | ToolKind::Circle => self.brush.set_size(size),
        }
    }

    pub fn set_color(&mut self, color: Color32) {
        self.brush.set_color(color);
    }

    pub fn set_opacity_percent(&mut self, percent: u8) {
        self.brush.set_opacity_percent(percent);
    }
}
