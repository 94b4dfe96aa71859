use egui::Pos2;

use crate::document::Document;

mod draw_stroke_tool;
mod settings;
mod shape_tool;

pub use draw_stroke_tool::DrawStrokeTool;
pub use settings::{ToolBox, ToolSettings};
pub use shape_tool::ShapeTool;

/// Which tool the user has selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolKind {
    #[default]
    Brush,
    Eraser,
    Rectangle,
    Circle,
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [ToolKind::Brush, ToolKind::Eraser, ToolKind::Rectangle, ToolKind::Circle];

    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Brush => "Brush",
            ToolKind::Eraser => "Eraser",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Circle => "Circle",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ToolKind::Brush => "🖌 Brush",
            ToolKind::Eraser => "⌫ Eraser",
            ToolKind::Rectangle => "▭ Rectangle",
            ToolKind::Circle => "◯ Circle",
        }
    }

    pub fn is_shape(&self) -> bool {
        matches!(self, ToolKind::Rectangle | ToolKind::Circle)
    }
}

/// Per-gesture behavior of a drawing tool.
///
/// A tool instance lives from pointer-down to pointer-up. Committing the
/// result to history is the caller's job, after `on_pointer_up` returns.
pub trait Tool {
    /// Return the name of the tool
    fn name(&self) -> &'static str;

    /// Start the gesture at `pos`.
    fn on_pointer_down(&mut self, pos: Pos2, doc: &mut Document);

    /// Extend the stroke or update the preview.
    fn on_pointer_move(&mut self, pos: Pos2, doc: &mut Document);

    /// Finish the gesture, leaving the result on the permanent surface.
    fn on_pointer_up(&mut self, doc: &mut Document);
}

/// Enum over all tool implementations, so the editor can hold one by value.
#[derive(Debug, Clone)]
pub enum ToolType {
    DrawStroke(DrawStrokeTool),
    Shape(ShapeTool),
}

impl ToolType {
    /// Creates the tool for `kind`, painting with `settings`.
    pub fn new_instance(kind: ToolKind, settings: &ToolSettings) -> Self {
        let style = settings.style();
        match kind {
            ToolKind::Brush | ToolKind::Eraser => Self::DrawStroke(DrawStrokeTool::new(style)),
            ToolKind::Rectangle => Self::Shape(ShapeTool::rectangle(style)),
            ToolKind::Circle => Self::Shape(ShapeTool::circle(style)),
        }
    }
}

impl Tool for ToolType {
    fn name(&self) -> &'static str {
        match self {
            Self::DrawStroke(tool) => tool.name(),
            Self::Shape(tool) => tool.name(),
        }
    }

    fn on_pointer_down(&mut self, pos: Pos2, doc: &mut Document) {
        match self {
            Self::DrawStroke(tool) => tool.on_pointer_down(pos, doc),
            Self::Shape(tool) => tool.on_pointer_down(pos, doc),
        }
    }

    fn on_pointer_move(&mut self, pos: Pos2, doc: &mut Document) {
        match self {
            Self::DrawStroke(tool) => tool.on_pointer_move(pos, doc),
            Self::Shape(tool) => tool.on_pointer_move(pos, doc),
        }
    }

    fn on_pointer_up(&mut self, doc: &mut Document) {
        match self {
            Self::DrawStroke(tool) => tool.on_pointer_up(doc),
            Self::Shape(tool) => tool.on_pointer_up(doc),
        }
    }
}
