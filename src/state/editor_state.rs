use crate::tools::{Tool, ToolType};

/// Whether a gesture is in progress.
///
/// `Drawing` is entered only by pointer-down; every pointer-move is ignored
/// unless the editor is in this state.
#[derive(Debug, Clone, Default)]
pub enum EditorState {
    #[default]
    Idle,
    Drawing {
        active_tool: ToolType,
    },
}

impl EditorState {
    pub fn active_tool_mut(&mut self) -> Option<&mut ToolType> {
        match self {
            Self::Drawing { active_tool } => Some(active_tool),
            Self::Idle => None,
        }
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }

    /// Leaves the drawing state, handing back the tool that was active.
    pub fn take_tool(&mut self) -> Option<ToolType> {
        match std::mem::take(self) {
            Self::Drawing { active_tool } => Some(active_tool),
            Self::Idle => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Drawing { active_tool } => active_tool.name(),
        }
    }
}
