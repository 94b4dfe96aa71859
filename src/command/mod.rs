mod history;

pub use history::SnapshotHistory;

use crate::error::PaintError;
use crate::export::ExportFormat;

/// Result type for command execution
pub type CommandResult = Result<(), PaintError>;

/// Discrete actions invoked from buttons or keyboard shortcuts
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Step back to the previous committed state
    Undo,
    /// Step forward to the next committed state
    Redo,
    /// Wipe the canvas and commit the empty state
    Clear,
    /// Ask the UI to show the save dialog
    OpenSaveDialog,
    /// Export the current committed state
    Save {
        filename: String,
        format: ExportFormat,
    },
}

impl Command {
    /// Short label used in logs and on buttons
    pub fn label(&self) -> &'static str {
        match self {
            Command::Undo => "Undo",
            Command::Redo => "Redo",
            Command::Clear => "Clear",
            Command::OpenSaveDialog => "Save…",
            Command::Save { .. } => "Save",
        }
    }
}
