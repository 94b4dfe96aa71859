use egui::Pos2;

use crate::command::SnapshotHistory;
use crate::stroke::Shape;
use crate::surface::{Snapshot, StrokeStyle, Surface};

/// The drawing: the permanent surface, a scratch surface for shape previews,
/// and the snapshot history of committed states.
pub struct Document {
    surface: Surface,
    scratch: Surface,
    history: SnapshotHistory,
    history_limit: Option<usize>,
    /// Bumped on every pixel change so the renderer knows when to re-upload.
    revision: u64,
}

impl Document {
    pub fn new(width: u32, height: u32, scale: f32, history_limit: Option<usize>) -> Self {
        let surface = Surface::new(width, height, scale);
        let scratch = Surface::new(width, height, scale);
        let history = SnapshotHistory::new(surface.snapshot(), history_limit);
        Self {
            surface,
            scratch,
            history,
            history_limit,
            revision: 0,
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn scratch(&self) -> &Surface {
        &self.scratch
    }

    pub fn history(&self) -> &SnapshotHistory {
        &self.history
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn size(&self) -> [usize; 2] {
        self.surface.size()
    }

    pub fn scale(&self) -> f32 {
        self.surface.scale()
    }

    /// The state an export should write: the current history entry.
    pub fn committed(&self) -> &Snapshot {
        self.history.current()
    }

    /// Repaints an in-progress freehand stroke over the last committed state.
    ///
    /// The whole polyline is stroked as one path every time, so translucent
    /// strokes don't darken where consecutive segments overlap.
    pub fn paint_stroke(&mut self, points: &[Pos2], style: &StrokeStyle) {
        self.surface.restore(self.history.current());
        self.surface.stroke_polyline(points, style);
        self.touch();
    }

    /// Replaces the scratch content with a preview of `shape`.
    pub fn preview_shape(&mut self, shape: &Shape, style: &StrokeStyle) {
        self.scratch.clear();
        shape.draw(&mut self.scratch, style);
        self.touch();
    }

    pub fn clear_scratch(&mut self) {
        self.scratch.clear();
        self.touch();
    }

    /// Draws the scratch surface onto the permanent one, then empties it.
    pub fn composite_scratch(&mut self) {
        self.scratch.composite_onto(&mut self.surface);
        self.scratch.clear();
        self.touch();
    }

    /// Captures the permanent surface as the newest history entry.
    pub fn commit(&mut self) {
        self.history.commit(self.surface.snapshot());
    }

    /// Returns `false` when already at the oldest state.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.surface.restore(snapshot);
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Returns `false` when already at the newest state.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.surface.restore(snapshot);
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Wipes the permanent surface and commits the empty state.
    pub fn clear(&mut self) {
        self.surface.clear();
        self.scratch.clear();
        self.touch();
        self.commit();
    }

    /// Throws away pixels painted since the last commit.
    pub fn discard_uncommitted(&mut self) {
        self.surface.restore(self.history.current());
        self.scratch.clear();
        self.touch();
    }

    /// Reallocates both surfaces blank and restarts history from a single
    /// blank snapshot. Existing artwork is not carried over.
    pub fn resize(&mut self, width: u32, height: u32, scale: f32) {
        self.surface = Surface::new(width, height, scale);
        self.scratch = Surface::new(width, height, scale);
        self.history = SnapshotHistory::new(self.surface.snapshot(), self.history_limit);
        self.touch();
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Color32, pos2};

    fn style() -> StrokeStyle {
        StrokeStyle { color: Color32::RED, width: 3.0, opacity: 1.0 }
    }

    #[test]
    fn test_preview_stays_off_the_permanent_surface() {
        let mut doc = Document::new(32, 32, 1.0, None);
        let blank = doc.surface().snapshot();

        doc.preview_shape(&Shape::rectangle(pos2(4.0, 4.0), pos2(20.0, 20.0)), &style());

        assert_eq!(doc.surface().snapshot(), blank);
        assert_ne!(doc.scratch().snapshot(), blank);
    }

    #[test]
    fn test_composite_moves_preview_and_clears_scratch() {
        let mut doc = Document::new(32, 32, 1.0, None);
        let blank = doc.surface().snapshot();

        doc.preview_shape(&Shape::circle(pos2(16.0, 16.0), pos2(24.0, 16.0)), &style());
        doc.composite_scratch();

        assert_ne!(doc.surface().snapshot(), blank);
        assert_eq!(doc.scratch().snapshot(), blank);
    }

    #[test]
    fn test_repainted_stroke_keeps_committed_pixels() {
        let mut doc = Document::new(32, 16, 1.0, None);
        doc.paint_stroke(&[pos2(2.0, 2.0)], &style());
        doc.commit();
        let dot = doc.surface().pixel(2, 2);

        doc.paint_stroke(&[pos2(4.0, 10.0), pos2(16.0, 10.0)], &style());
        doc.paint_stroke(&[pos2(4.0, 10.0), pos2(16.0, 10.0), pos2(28.0, 10.0)], &style());

        assert_eq!(doc.surface().pixel(2, 2), dot);
        assert_eq!(doc.surface().pixel(22, 10), Some([255, 0, 0, 255]));
        assert_eq!(doc.history().len(), 2);
    }

    #[test]
    fn test_clear_commits_blank_state() {
        let mut doc = Document::new(16, 16, 1.0, None);
        doc.paint_stroke(&[pos2(1.0, 1.0), pos2(10.0, 10.0)], &style());
        doc.commit();
        doc.clear();

        assert_eq!(doc.history().len(), 3);
        assert_eq!(doc.committed(), &doc.history().entries()[0]);
    }

    #[test]
    fn test_discard_uncommitted_restores_last_commit() {
        let mut doc = Document::new(16, 16, 1.0, None);
        let blank = doc.surface().snapshot();
        doc.paint_stroke(&[pos2(1.0, 1.0), pos2(10.0, 10.0)], &style());

        doc.discard_uncommitted();
        assert_eq!(doc.surface().snapshot(), blank);
        assert_eq!(doc.history().len(), 1);
    }

    #[test]
    fn test_resize_restarts_history() {
        let mut doc = Document::new(16, 16, 1.0, Some(10));
        doc.paint_stroke(&[pos2(1.0, 1.0), pos2(10.0, 10.0)], &style());
        doc.commit();
        let revision = doc.revision();

        doc.resize(40, 20, 2.0);

        assert_eq!(doc.size(), [40, 20]);
        assert_eq!(doc.scale(), 2.0);
        assert_eq!(doc.history().len(), 1);
        assert_eq!(doc.history().limit(), Some(10));
        assert!(doc.revision() > revision);
    }
}
