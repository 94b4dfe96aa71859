use crate::command::Command;
use crate::config::PaintConfig;
use crate::coords::SurfaceLayout;
use crate::input::{InputEvent, InputHandler, route_event};
use crate::panels::{SaveDialog, central_panel, tools_panel};
use crate::renderer::Renderer;
use crate::state::EditorContext;

pub struct PaintApp {
    editor: EditorContext,
    renderer: Renderer,
    input: InputHandler,
    save_dialog: SaveDialog,
    /// Canvas placement from the last frame; `None` before the first layout
    layout: Option<SurfaceLayout>,
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: PaintConfig) -> Self {
        Self::with_context(&cc.egui_ctx, config)
    }

    pub fn with_context(ctx: &egui::Context, config: PaintConfig) -> Self {
        let save_dialog = SaveDialog::new(&config.default_filename, config.default_format);
        // The real canvas size is only known once the central panel is laid out
        let editor = EditorContext::new(config, 0, 0, ctx.pixels_per_point());

        Self {
            editor,
            renderer: Renderer::new(ctx),
            input: InputHandler::new(),
            save_dialog,
            layout: None,
        }
    }

    pub fn editor(&self) -> &EditorContext {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EditorContext {
        &mut self.editor
    }

    pub fn execute_command(&mut self, command: Command) {
        log::debug!("Executing command: {}", command.label());
        match command {
            Command::OpenSaveDialog => self.save_dialog.open(),
            Command::Save { .. } => match self.editor.execute(command) {
                Ok(()) => self.save_dialog.close(),
                Err(err) => {
                    log::error!("Save failed: {}", err);
                    self.save_dialog.open();
                    self.save_dialog.set_error(err.to_string());
                }
            },
            other => {
                if let Err(err) = self.editor.execute(other) {
                    log::error!("Command failed: {}", err);
                }
            }
        }
    }

    /// Records where the canvas is drawn this frame and reallocates the
    /// surfaces when its pixel size or scale changed.
    pub fn update_layout(&mut self, rect: egui::Rect, layer: egui::LayerId, pixels_per_point: f32) {
        let layout = SurfaceLayout::fitted(rect, pixels_per_point);
        let document = &self.editor.document;
        if layout.buffer_size != document.size() || layout.device_pixel_ratio != document.scale() {
            let [width, height] = layout.buffer_size;
            self.editor.resize(width as u32, height as u32, layout.device_pixel_ratio);
        }
        self.input.set_canvas(rect, layer);
        self.layout = Some(layout);
    }

    pub fn handle_input(&mut self, ctx: &egui::Context) {
        let Some(layout) = self.layout else {
            return;
        };
        for event in self.input.process_input(ctx) {
            // The save dialog is modal: nothing new starts on the canvas behind it
            let starts_gesture = matches!(event, InputEvent::PointerDown { .. } | InputEvent::TouchStart { .. });
            if starts_gesture && self.save_dialog.is_open() {
                continue;
            }
            route_event(&event, &mut self.editor, &layout);
        }
    }

    /// Runs one frame of the whole UI: shortcuts, panels, then the save dialog.
    pub fn ui(&mut self, ctx: &egui::Context) {
        for command in self.input.process_shortcuts(ctx) {
            self.execute_command(command);
        }

        tools_panel(self, ctx);
        central_panel(self, ctx);

        if let Some(command) = self.save_dialog.show(ctx) {
            self.execute_command(command);
        }
    }

    pub fn render(&mut self, painter: &egui::Painter, rect: egui::Rect) {
        let background = self.editor.background();
        self.renderer.render(painter, rect, &self.editor.document, background);
    }
}

impl eframe::App for PaintApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui(ctx);
    }
}
