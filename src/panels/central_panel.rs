use crate::PaintApp;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            // Create a painting area that fills the remaining space
            let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::drag());
            let canvas_rect = response.rect;

            app.update_layout(canvas_rect, ui.layer_id(), ctx.pixels_per_point());
            app.handle_input(ctx);
            app.render(&painter, canvas_rect);

            if app.editor().is_drawing() {
                ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
            }
        });
}
