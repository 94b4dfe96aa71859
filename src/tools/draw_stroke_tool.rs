use egui::Pos2;

use super::Tool;
use crate::document::Document;
use crate::stroke::ActiveStroke;
use crate::surface::StrokeStyle;

/// Freehand brush/eraser: paints straight onto the permanent surface.
#[derive(Debug, Clone)]
pub struct DrawStrokeTool {
    style: StrokeStyle,
    // Transient state: the stroke being drawn (if any)
    current_stroke: Option<ActiveStroke>,
}

impl DrawStrokeTool {
    pub fn new(style: StrokeStyle) -> Self {
        Self {
            style,
            current_stroke: None,
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.current_stroke.is_some()
    }
}

impl Tool for DrawStrokeTool {
    fn name(&self) -> &'static str {
        "DrawStroke"
    }

    fn on_pointer_down(&mut self, pos: Pos2, doc: &mut Document) {
        // A click without movement still leaves a round dot
        let stroke = ActiveStroke::new(pos, self.style);
        doc.paint_stroke(stroke.points(), stroke.style());
        self.current_stroke = Some(stroke);
    }

    fn on_pointer_move(&mut self, pos: Pos2, doc: &mut Document) {
        if let Some(stroke) = &mut self.current_stroke {
            stroke.advance(pos);
            doc.paint_stroke(stroke.points(), stroke.style());
        }
    }

    fn on_pointer_up(&mut self, _doc: &mut Document) {
        self.current_stroke = None;
    }
}
