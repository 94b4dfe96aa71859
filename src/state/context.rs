//! The drawing session: document, tools and gesture state in one owned value.
//!
//! Input handlers receive an `&mut EditorContext` explicitly; nothing about
//! the session lives in globals. Every operation runs to completion before
//! returning.

use egui::{Color32, Pos2};

use super::EditorState;
use crate::command::{Command, CommandResult};
use crate::config::PaintConfig;
use crate::document::Document;
use crate::export;
use crate::tools::{Tool, ToolBox, ToolKind, ToolType};

pub struct EditorContext {
    /// The drawing and its history
    pub document: Document,
    /// Current tool and its settings
    pub tools: ToolBox,
    state: EditorState,
    config: PaintConfig,
}

impl EditorContext {
    /// Creates a session with a blank `width` × `height` surface.
    pub fn new(config: PaintConfig, width: u32, height: u32, scale: f32) -> Self {
        Self {
            document: Document::new(width, height, scale, config.history_limit),
            tools: ToolBox::new(config.brush, config.eraser()),
            state: EditorState::Idle,
            config,
        }
    }

    pub fn config(&self) -> &PaintConfig {
        &self.config
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn is_drawing(&self) -> bool {
        self.state.is_drawing()
    }

    pub fn background(&self) -> Color32 {
        self.config.background
    }

    pub fn set_tool(&mut self, kind: ToolKind) {
        self.tools.set_current(kind);
    }

    /// Starts a stroke or places a shape anchor at `pos` (surface coordinates).
    pub fn pointer_down(&mut self, pos: Pos2) {
        if self.state.is_drawing() {
            // A second press without a release: finish the first gesture
            self.pointer_up();
        }
        let mut tool = ToolType::new_instance(self.tools.current(), self.tools.active_settings());
        tool.on_pointer_down(pos, &mut self.document);
        self.state = EditorState::Drawing { active_tool: tool };
    }

    /// Extends the active gesture; ignored when nothing is being drawn.
    pub fn pointer_move(&mut self, pos: Pos2) {
        if let Some(tool) = self.state.active_tool_mut() {
            tool.on_pointer_move(pos, &mut self.document);
        }
    }

    /// Ends the active gesture and commits it as one history entry.
    pub fn pointer_up(&mut self) {
        if let Some(mut tool) = self.state.take_tool() {
            tool.on_pointer_up(&mut self.document);
            self.document.commit();
        }
    }

    /// Drops an in-progress gesture without committing it.
    pub fn cancel(&mut self) {
        if self.state.take_tool().is_some() {
            log::debug!("Cancelled in-progress gesture");
            self.document.discard_uncommitted();
        }
    }

    /// Reallocates the surfaces for a new layout. History and any gesture in
    /// progress are discarded.
    pub fn resize(&mut self, width: u32, height: u32, scale: f32) {
        if self.state.take_tool().is_some() {
            log::debug!("Resize cancelled the in-progress gesture");
        }
        log::info!("Canvas resized to {}x{} @ {}x", width, height, scale);
        self.document.resize(width, height, scale);
    }

    pub fn execute(&mut self, command: Command) -> CommandResult {
        match command {
            Command::Undo => {
                self.cancel();
                if !self.document.undo() {
                    log::debug!("Nothing to undo");
                }
                Ok(())
            }
            Command::Redo => {
                self.cancel();
                if !self.document.redo() {
                    log::debug!("Nothing to redo");
                }
                Ok(())
            }
            Command::Clear => {
                self.cancel();
                log::info!("Clearing canvas");
                self.document.clear();
                Ok(())
            }
            Command::OpenSaveDialog => {
                log::warn!("OpenSaveDialog must be handled by the UI");
                Ok(())
            }
            Command::Save { filename, format } => {
                let filename = if filename.trim().is_empty() {
                    self.config.default_filename.clone()
                } else {
                    filename
                };
                export::save(self.document.committed(), &filename, format, &self.config)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn context() -> EditorContext {
        EditorContext::new(PaintConfig::default(), 32, 32, 1.0)
    }

    #[test]
    fn test_move_before_down_is_ignored() {
        let mut ctx = context();
        ctx.pointer_move(pos2(5.0, 5.0));
        ctx.pointer_up();

        assert!(!ctx.is_drawing());
        assert_eq!(ctx.document.history().len(), 1);
    }

    #[test]
    fn test_each_gesture_commits_once() {
        let mut ctx = context();
        ctx.set_tool(ToolKind::Rectangle);
        ctx.pointer_down(pos2(4.0, 4.0));
        ctx.pointer_move(pos2(20.0, 20.0));
        ctx.pointer_up();

        assert_eq!(ctx.document.history().len(), 2);
        assert_eq!(ctx.document.history().current_index(), 1);
    }

    #[test]
    fn test_cancel_discards_stroke() {
        let mut ctx = context();
        let blank = ctx.document.surface().snapshot();
        ctx.pointer_down(pos2(4.0, 4.0));
        ctx.pointer_move(pos2(20.0, 20.0));
        ctx.cancel();

        assert!(!ctx.is_drawing());
        assert_eq!(ctx.document.surface().snapshot(), blank);
        assert_eq!(ctx.document.history().len(), 1);
    }

    #[test]
    fn test_eraser_paints_background() {
        let mut ctx = context();
        ctx.pointer_down(pos2(16.0, 16.0));
        ctx.pointer_up();
        assert_eq!(ctx.document.surface().pixel(16, 16), Some([0, 0, 0, 255]));

        ctx.set_tool(ToolKind::Eraser);
        ctx.pointer_down(pos2(16.0, 16.0));
        ctx.pointer_up();
        assert_eq!(ctx.document.surface().pixel(16, 16), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_clear_is_undoable() {
        let mut ctx = context();
        ctx.pointer_down(pos2(10.0, 10.0));
        ctx.pointer_up();
        let drawn = ctx.document.surface().snapshot();

        ctx.execute(Command::Clear).unwrap();
        assert_ne!(ctx.document.surface().snapshot(), drawn);

        ctx.execute(Command::Undo).unwrap();
        assert_eq!(ctx.document.surface().snapshot(), drawn);
    }

    #[test]
    fn test_save_with_blank_filename_uses_default() {
        let dir = std::env::temp_dir().join(format!("eframe_sketch_ctx_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let config = PaintConfig {
            export_dir: dir.clone(),
            ..PaintConfig::default()
        };
        let mut ctx = EditorContext::new(config, 8, 8, 1.0);

        ctx.execute(Command::Save {
            filename: "  ".to_owned(),
            format: export::ExportFormat::Png,
        })
        .unwrap();

        assert!(dir.join("drawing.png").exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
