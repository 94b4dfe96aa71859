use eframe_sketch::input::{InputEvent, InputLocation, PanelKind, TouchPoint, route_event};
use eframe_sketch::{EditorContext, PaintConfig, SurfaceLayout, map_to_surface};
use egui::{Rect, TouchId, pos2, vec2};

#[test]
fn test_double_density_buffer_maps_corner_and_center() {
    let rect = Rect::from_min_size(pos2(40.0, 30.0), vec2(200.0, 100.0));
    let buffer = [400, 200];

    assert_eq!(map_to_surface(rect.min, rect, 1.0, buffer), Some(pos2(0.0, 0.0)));
    assert_eq!(map_to_surface(rect.center(), rect, 1.0, buffer), Some(pos2(200.0, 100.0)));
}

#[test]
fn test_hidden_canvas_is_not_mapped() {
    let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(0.0, 0.0));
    let layout = SurfaceLayout::fitted(rect, 2.0);
    assert_eq!(layout.map(pos2(0.0, 0.0)), None);
}

#[test]
fn test_press_on_hidden_canvas_does_not_start_drawing() {
    let mut editor = EditorContext::new(PaintConfig::default(), 0, 0, 1.0);
    let layout = SurfaceLayout::fitted(Rect::from_min_size(pos2(0.0, 0.0), vec2(0.0, 0.0)), 1.0);
    let press = InputEvent::PointerDown {
        location: InputLocation {
            position: pos2(0.0, 0.0),
            panel: PanelKind::Canvas,
        },
    };

    route_event(&press, &mut editor, &layout);
    route_event(&InputEvent::PointerUp, &mut editor, &layout);

    assert!(!editor.is_drawing());
    assert_eq!(editor.document.history().len(), 1);
}

#[test]
fn test_hidpi_touch_draws_under_the_finger() {
    let rect = Rect::from_min_size(pos2(100.0, 50.0), vec2(40.0, 40.0));
    let layout = SurfaceLayout::fitted(rect, 2.0);
    let [width, height] = layout.buffer_size;
    let mut editor = EditorContext::new(PaintConfig::default(), width as u32, height as u32, 2.0);

    let touches = vec![
        TouchPoint { id: TouchId(1), position: pos2(110.0, 60.0) },
        TouchPoint { id: TouchId(2), position: pos2(135.0, 85.0) },
    ];
    route_event(&InputEvent::TouchStart { touches }, &mut editor, &layout);
    route_event(&InputEvent::TouchEnd, &mut editor, &layout);

    // (10, 10) points into the canvas is pixel (20, 20) at 2x
    assert_eq!(editor.document.surface().pixel(20, 20), Some([0, 0, 0, 255]));
    assert_eq!(editor.document.surface().pixel(70, 70), Some([0, 0, 0, 0]));
    assert_eq!(editor.document.history().len(), 2);
}

#[test]
fn test_release_outside_canvas_still_commits() {
    let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(50.0, 50.0));
    let layout = SurfaceLayout::fitted(rect, 1.0);
    let mut editor = EditorContext::new(PaintConfig::default(), 50, 50, 1.0);

    let at = |x: f32, y: f32, panel| InputLocation { position: pos2(x, y), panel };
    route_event(&InputEvent::PointerDown { location: at(10.0, 10.0, PanelKind::Canvas) }, &mut editor, &layout);
    route_event(&InputEvent::PointerMove { location: at(80.0, 10.0, PanelKind::Global) }, &mut editor, &layout);
    route_event(&InputEvent::PointerUp, &mut editor, &layout);

    assert!(!editor.is_drawing());
    assert_eq!(editor.document.history().len(), 2);
    assert_eq!(editor.document.surface().pixel(45, 10), Some([0, 0, 0, 255]));
}

#[test]
fn test_press_outside_canvas_is_ignored() {
    let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(50.0, 50.0));
    let layout = SurfaceLayout::fitted(rect, 1.0);
    let mut editor = EditorContext::new(PaintConfig::default(), 50, 50, 1.0);

    let press = InputEvent::PointerDown {
        location: InputLocation { position: pos2(70.0, 10.0), panel: PanelKind::Global },
    };
    route_event(&press, &mut editor, &layout);

    assert!(!editor.is_drawing());
}
