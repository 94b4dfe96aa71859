use egui::Color32;

use crate::PaintApp;
use crate::command::Command;
use crate::tools::ToolKind;

/// Quick-pick swatches shown under the color picker.
pub const PALETTE: [Color32; 10] = [
    Color32::BLACK,
    Color32::WHITE,
    Color32::from_rgb(0xE5, 0x39, 0x35),
    Color32::from_rgb(0xFB, 0x8C, 0x00),
    Color32::from_rgb(0xFD, 0xD8, 0x35),
    Color32::from_rgb(0x43, 0xA0, 0x47),
    Color32::from_rgb(0x1E, 0x88, 0xE5),
    Color32::from_rgb(0x8E, 0x24, 0xAA),
    Color32::from_rgb(0x6D, 0x4C, 0x41),
    Color32::from_rgb(0x75, 0x75, 0x75),
];

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    let mut commands = Vec::new();

    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            let editor = app.editor_mut();
            ui.heading("Tools");

            ui.horizontal_wrapped(|ui| {
                for kind in ToolKind::ALL {
                    if ui.selectable_label(editor.tools.current() == kind, kind.label()).clicked() {
                        log::info!("Tool selected from UI: {}", kind.name());
                        editor.set_tool(kind);
                    }
                }
            });
            ui.separator();

            let is_eraser = editor.tools.current() == ToolKind::Eraser;

            ui.add_enabled_ui(!is_eraser, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Color:");
                    let mut color = editor.tools.brush().color();
                    if egui::color_picker::color_edit_button_srgba(ui, &mut color, egui::color_picker::Alpha::Opaque)
                        .changed()
                    {
                        editor.tools.set_color(color);
                    }
                });

                ui.horizontal_wrapped(|ui| {
                    for swatch in PALETTE {
                        let button = egui::Button::new("").fill(swatch).min_size(egui::vec2(18.0, 18.0));
                        if ui.add(button).clicked() {
                            editor.tools.set_color(swatch);
                        }
                    }
                });
            });

            let mut size = editor.tools.active_settings().size();
            if ui.add(egui::Slider::new(&mut size, 1..=50).text("Size")).changed() {
                editor.tools.set_size(size);
            }

            let mut opacity = editor.tools.active_settings().opacity_percent();
            let slider = egui::Slider::new(&mut opacity, 0..=100).text("Opacity").suffix("%");
            if ui.add_enabled(!is_eraser, slider).changed() {
                editor.tools.set_opacity_percent(opacity);
            }

            ui.separator();

            let history = editor.document.history();
            ui.horizontal(|ui| {
                if ui.add_enabled(history.can_undo(), egui::Button::new("Undo")).clicked() {
                    commands.push(Command::Undo);
                }
                if ui.add_enabled(history.can_redo(), egui::Button::new("Redo")).clicked() {
                    commands.push(Command::Redo);
                }
                if ui.button("Clear").clicked() {
                    commands.push(Command::Clear);
                }
                if ui.button("Save…").clicked() {
                    commands.push(Command::OpenSaveDialog);
                }
            });

            ui.separator();
            ui.label(format!(
                "History: {} / {}",
                history.current_index() + 1,
                history.len()
            ));
            ui.label(format!(
                "Snapshot memory: {:.1} MiB",
                history.memory_bytes() as f64 / (1024.0 * 1024.0)
            ));
            ui.label(format!("State: {}", editor.state().name()));
        });

    for command in commands {
        app.execute_command(command);
    }
}
