use egui::Pos2;

use super::{InputEvent, PanelKind, first_contact};
use crate::coords::SurfaceLayout;
use crate::state::EditorContext;

/// Routes an input event into the editor, mapping screen positions onto the
/// surface through `layout`.
///
/// Presses only start drawing inside the canvas; releases end the gesture
/// wherever they happen.
pub fn route_event(event: &InputEvent, editor: &mut EditorContext, layout: &SurfaceLayout) {
    match event {
        InputEvent::PointerDown { location } => {
            if location.panel == PanelKind::Canvas {
                begin(editor, layout, location.position);
            }
        }
        InputEvent::TouchStart { touches } => {
            if let Some(pos) = first_contact(touches).filter(|pos| layout.contains(*pos)) {
                begin(editor, layout, pos);
            }
        }
        InputEvent::PointerMove { location } => extend(editor, layout, location.position),
        InputEvent::TouchMove { touches } => {
            if let Some(pos) = first_contact(touches) {
                extend(editor, layout, pos);
            }
        }
        InputEvent::PointerUp | InputEvent::TouchEnd => editor.pointer_up(),
    }
}

fn begin(editor: &mut EditorContext, layout: &SurfaceLayout, screen_pos: Pos2) {
    match layout.map(screen_pos) {
        Some(pos) => editor.pointer_down(pos),
        None => log::warn!("Canvas is not laid out; ignoring press at {:?}", screen_pos),
    }
}

fn extend(editor: &mut EditorContext, layout: &SurfaceLayout, screen_pos: Pos2) {
    if !editor.is_drawing() {
        return;
    }
    if let Some(pos) = layout.map(screen_pos) {
        editor.pointer_move(pos);
    }
}
