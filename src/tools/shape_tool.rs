use egui::Pos2;

use super::Tool;
use crate::document::Document;
use crate::stroke::Shape;
use crate::surface::StrokeStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rectangle,
    Circle,
}

/// Rectangle/circle outline tool.
///
/// While the pointer moves, the shape only exists on the scratch surface.
/// Pointer-up composites it onto the permanent surface once.
#[derive(Debug, Clone)]
pub struct ShapeTool {
    kind: ShapeKind,
    style: StrokeStyle,
    anchor: Option<Pos2>,
}

impl ShapeTool {
    pub fn rectangle(style: StrokeStyle) -> Self {
        Self::new(ShapeKind::Rectangle, style)
    }

    pub fn circle(style: StrokeStyle) -> Self {
        Self::new(ShapeKind::Circle, style)
    }

    fn new(kind: ShapeKind, style: StrokeStyle) -> Self {
        Self {
            kind,
            style,
            anchor: None,
        }
    }

    fn shape_to(&self, anchor: Pos2, pos: Pos2) -> Shape {
        match self.kind {
            ShapeKind::Rectangle => Shape::rectangle(anchor, pos),
            ShapeKind::Circle => Shape::circle(anchor, pos),
        }
    }
}

impl Tool for ShapeTool {
    fn name(&self) -> &'static str {
        match self.kind {
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Circle => "Circle",
        }
    }

    fn on_pointer_down(&mut self, pos: Pos2, doc: &mut Document) {
        self.anchor = Some(pos);
        doc.clear_scratch();
    }

    fn on_pointer_move(&mut self, pos: Pos2, doc: &mut Document) {
        let Some(anchor) = self.anchor else {
            return;
        };
        let shape = self.shape_to(anchor, pos);
        doc.preview_shape(&shape, &self.style);
    }

    fn on_pointer_up(&mut self, doc: &mut Document) {
        // Without a move there's no preview and the scratch surface is empty
        if self.anchor.take().is_some() {
            doc.composite_scratch();
        }
    }
}
