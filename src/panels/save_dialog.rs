use crate::command::Command;
use crate::export::ExportFormat;

/// Filename/format prompt shown before exporting.
#[derive(Debug)]
pub struct SaveDialog {
    open: bool,
    filename: String,
    format: ExportFormat,
    error: Option<String>,
}

impl SaveDialog {
    pub fn new(filename: &str, format: ExportFormat) -> Self {
        Self {
            open: false,
            filename: filename.to_owned(),
            format,
            error: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
        self.error = None;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Keeps the dialog open and shows why the last save failed.
    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    /// Draws the dialog. Returns the save command once the user confirms.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<Command> {
        if !self.open {
            return None;
        }

        let mut command = None;
        let mut cancelled = false;

        egui::Window::new("Save drawing")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("File name:");
                    ui.text_edit_singleline(&mut self.filename);
                });

                egui::ComboBox::from_label("Format")
                    .selected_text(self.format.label())
                    .show_ui(ui, |ui| {
                        for format in ExportFormat::ALL {
                            ui.selectable_value(&mut self.format, format, format.label());
                        }
                    });

                if let Some(error) = &self.error {
                    let color = ui.visuals().error_fg_color;
                    ui.colored_label(color, error);
                }

                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        command = Some(Command::Save {
                            filename: self.filename.clone(),
                            format: self.format,
                        });
                    }
                    if ui.button("Cancel").clicked() {
                        cancelled = true;
                    }
                });
            });

        if cancelled || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.close();
        }
        command
    }
}
