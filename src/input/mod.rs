use egui::{Context, Key, LayerId, Modifiers, PointerButton, Pos2, Rect, TouchId, TouchPhase};

use crate::command::Command;

mod router;
pub use router::route_event;

/// Represents which panel an input event occurred in
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelKind {
    /// The drawing canvas
    Canvas,
    /// Anywhere else in the window
    Global,
}

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// The position in screen coordinates (points)
    pub position: Pos2,
    /// The panel in which the event occurred
    pub panel: PanelKind,
}

/// One active touch contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: TouchId,
    pub position: Pos2,
}

/// Pointer and touch input, reduced to what the drawing engine needs.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button was pressed
    PointerDown { location: InputLocation },
    /// Pointer moved
    PointerMove { location: InputLocation },
    /// Primary button was released, anywhere in the window
    PointerUp,
    /// A finger touched down; `touches` lists every active contact in start order
    TouchStart { touches: Vec<TouchPoint> },
    /// A contact moved
    TouchMove { touches: Vec<TouchPoint> },
    /// The last contact lifted or was cancelled
    TouchEnd,
}

/// Position of the earliest still-active contact.
pub fn first_contact(touches: &[TouchPoint]) -> Option<Pos2> {
    touches.first().map(|touch| touch.position)
}

/// Maps a key press to its keyboard shortcut, if any.
///
/// Ctrl (Cmd on macOS) must be held and Alt must not be.
pub fn shortcut_command(key: Key, modifiers: Modifiers) -> Option<Command> {
    if !modifiers.command || modifiers.alt {
        return None;
    }
    match key {
        Key::Z => Some(Command::Undo),
        Key::Y => Some(Command::Redo),
        Key::S => Some(Command::OpenSaveDialog),
        _ => None,
    }
}

/// Handles converting raw egui input into our domain-specific InputEvents
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    /// Canvas rect and the layer it is painted on, from the latest layout
    canvas: Option<(Rect, LayerId)>,
    touches: Vec<TouchPoint>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the canvas rectangle and the layer the canvas is painted on
    pub fn set_canvas(&mut self, rect: Rect, layer: LayerId) {
        self.canvas = Some((rect, layer));
    }

    /// True when a window, popup or other area sits above the canvas at `pos`.
    fn is_covered(&self, ctx: &Context, pos: Pos2) -> bool {
        match self.canvas {
            Some((_, canvas_layer)) => ctx.layer_id_at(pos).is_some_and(|top| top != canvas_layer),
            None => false,
        }
    }

    fn determine_panel(&self, ctx: &Context, pos: Pos2) -> PanelKind {
        match self.canvas {
            Some((rect, _)) if rect.contains(pos) && !self.is_covered(ctx, pos) => PanelKind::Canvas,
            _ => PanelKind::Global,
        }
    }

    fn make_location(&self, ctx: &Context, pos: Pos2) -> InputLocation {
        InputLocation {
            position: pos,
            panel: self.determine_panel(ctx, pos),
        }
    }

    /// Applies one touch event, returning the engine event it produces.
    pub fn handle_touch(&mut self, id: TouchId, phase: TouchPhase, pos: Pos2) -> Option<InputEvent> {
        match phase {
            TouchPhase::Start => {
                let was_idle = self.touches.is_empty();
                self.touches.push(TouchPoint { id, position: pos });
                // Extra fingers don't start a second stroke
                was_idle.then(|| InputEvent::TouchStart { touches: self.touches.clone() })
            }
            TouchPhase::Move => {
                let touch = self.touches.iter_mut().find(|touch| touch.id == id)?;
                touch.position = pos;
                Some(InputEvent::TouchMove { touches: self.touches.clone() })
            }
            TouchPhase::End | TouchPhase::Cancel => {
                self.touches.retain(|touch| touch.id != id);
                self.touches.is_empty().then_some(InputEvent::TouchEnd)
            }
        }
    }

    /// Process raw egui input and generate our InputEvents, in delivery order
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        // Copied out so no input lock is held while asking egui about layers
        let raw_events = ctx.input(|input| input.events.clone());
        let touch_frame =
            !self.touches.is_empty() || raw_events.iter().any(|event| matches!(event, egui::Event::Touch { .. }));

        let mut events = Vec::new();
        for event in &raw_events {
            match *event {
                egui::Event::Touch { id, phase, pos, .. } => {
                    let Some(touch_event) = self.handle_touch(id, phase, pos) else {
                        continue;
                    };
                    if matches!(touch_event, InputEvent::TouchStart { .. }) && self.is_covered(ctx, pos) {
                        log::debug!("Touch at {:?} landed on an overlay", pos);
                        continue;
                    }
                    events.push(touch_event);
                }
                // egui also emulates the pointer from touches; skip those copies
                _ if touch_frame => {}
                egui::Event::PointerMoved(pos) => {
                    if self.last_pointer_pos != Some(pos) {
                        events.push(InputEvent::PointerMove {
                            location: self.make_location(ctx, pos),
                        });
                    }
                    self.last_pointer_pos = Some(pos);
                }
                egui::Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed,
                    ..
                } => {
                    if pressed {
                        events.push(InputEvent::PointerDown {
                            location: self.make_location(ctx, pos),
                        });
                    } else {
                        events.push(InputEvent::PointerUp);
                    }
                    self.last_pointer_pos = Some(pos);
                }
                egui::Event::PointerGone => self.last_pointer_pos = None,
                _ => {}
            }
        }

        events
    }

    /// Collects keyboard shortcut commands pressed this frame.
    ///
    /// Nothing fires while a text field has keyboard focus.
    pub fn process_shortcuts(&self, ctx: &Context) -> Vec<Command> {
        if ctx.wants_keyboard_input() {
            return Vec::new();
        }
        ctx.input(|input| {
            input
                .events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } => shortcut_command(*key, *modifiers),
                    _ => None,
                })
                .collect()
        })
    }
}
