use egui::Pos2;

use crate::surface::{StrokeStyle, Surface};

/// Freehand stroke in progress: every point the pen has visited and how it
/// paints.
#[derive(Debug, Clone)]
pub struct ActiveStroke {
    points: Vec<Pos2>,
    style: StrokeStyle,
}

impl ActiveStroke {
    pub fn new(start: Pos2, style: StrokeStyle) -> Self {
        Self {
            points: vec![start],
            style,
        }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn last(&self) -> Pos2 {
        // never empty: `new` seeds the first point
        self.points[self.points.len() - 1]
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    /// Moves the pen. Repeated positions are dropped.
    pub fn advance(&mut self, to: Pos2) {
        if self.last() != to {
            self.points.push(to);
        }
    }
}

/// Outline shape spanned from an anchor point to the current pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Rectangle { anchor: Pos2, corner: Pos2 },
    Circle { center: Pos2, radius: f32 },
}

impl Shape {
    pub fn rectangle(anchor: Pos2, corner: Pos2) -> Self {
        Self::Rectangle { anchor, corner }
    }

    /// Circle centered on `anchor` passing through `edge`.
    pub fn circle(anchor: Pos2, edge: Pos2) -> Self {
        Self::Circle {
            center: anchor,
            radius: anchor.distance(edge),
        }
    }

    pub fn draw(&self, surface: &mut Surface, style: &StrokeStyle) {
        match *self {
            Shape::Rectangle { anchor, corner } => surface.stroke_rect(anchor, corner, style),
            Shape::Circle { center, radius } => surface.stroke_circle(center, radius, style),
        }
    }
}
