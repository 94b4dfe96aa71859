use eframe::egui::{self, Color32, ColorImage, Rect, TextureHandle, TextureOptions};

use crate::document::Document;
use crate::surface::Surface;

/// Uploads the document surfaces to egui textures and paints them.
pub struct Renderer {
    ctx: egui::Context,
    surface_texture: Option<TextureHandle>,
    scratch_texture: Option<TextureHandle>,
    /// Document revision the textures were last uploaded from
    uploaded_revision: Option<u64>,
}

impl Renderer {
    pub fn new(ctx: &egui::Context) -> Self {
        Self {
            ctx: ctx.clone(),
            surface_texture: None,
            scratch_texture: None,
            uploaded_revision: None,
        }
    }

    /// Re-uploads both textures if the document changed since the last call.
    pub fn sync(&mut self, document: &Document) {
        if self.uploaded_revision == Some(document.revision()) {
            return;
        }
        upload(&self.ctx, &mut self.surface_texture, "canvas_surface", document.surface());
        upload(&self.ctx, &mut self.scratch_texture, "canvas_scratch", document.scratch());
        self.uploaded_revision = Some(document.revision());
    }

    /// Paints the background, the committed surface and the shape preview into `rect`.
    pub fn render(&mut self, painter: &egui::Painter, rect: Rect, document: &Document, background: Color32) {
        self.sync(document);

        painter.rect_filled(rect, 0.0, background);
        let uv = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
        for texture in [&self.surface_texture, &self.scratch_texture].into_iter().flatten() {
            painter.image(texture.id(), rect, uv, Color32::WHITE);
        }
    }
}

fn upload(ctx: &egui::Context, slot: &mut Option<TextureHandle>, name: &str, surface: &Surface) {
    if surface.width() == 0 || surface.height() == 0 {
        *slot = None;
        return;
    }
    // tiny-skia keeps premultiplied pixels, which egui uploads as-is
    let image = ColorImage::from_rgba_premultiplied(surface.size(), surface.data());
    match slot {
        Some(handle) => handle.set(image, TextureOptions::NEAREST),
        None => *slot = Some(ctx.load_texture(name, image, TextureOptions::NEAREST)),
    }
}
