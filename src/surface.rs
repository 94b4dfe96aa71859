use std::sync::Arc;

use egui::{Color32, Pos2};
use image::{Rgba, RgbaImage};
use tiny_skia::{
    Color, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint, PremultipliedColorU8, Rect, Stroke,
    Transform,
};

/// How a line, rectangle or circle outline is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color32,
    /// Line width in user-space units (scaled by the surface scale).
    pub width: f32,
    pub opacity: f32,
}

impl StrokeStyle {
    fn paint(&self) -> Paint<'static> {
        let [r, g, b, a] = self.color.to_srgba_unmultiplied();
        let alpha = (a as f32 * self.opacity.clamp(0.0, 1.0)).round() as u8;
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, alpha);
        paint.anti_alias = true;
        paint
    }
}

/// A full copy of a surface's pixels at one instant.
///
/// Pixels stay premultiplied, exactly as the surface holds them, so restoring
/// a snapshot is lossless.
#[derive(Clone, PartialEq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    pixels: Arc<[PremultipliedColorU8]>,
}

impl Snapshot {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes held by this snapshot's pixel buffer.
    pub fn byte_len(&self) -> usize {
        self.pixels.len() * 4
    }

    /// Straight-alpha copy for encoders.
    pub fn to_rgba_image(&self) -> RgbaImage {
        demultiplied(self.width, self.height, &self.pixels)
    }
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// A tiny-skia raster with a user-space scale.
///
/// Drawing calls take positions in user space; the scale (the device pixel
/// ratio) is applied as the path transform, so a surface with scale 2 has
/// twice as many pixels per user unit. A zero-sized surface holds no pixmap
/// and ignores drawing.
#[derive(Clone)]
pub struct Surface {
    pixmap: Option<Pixmap>,
    scale: f32,
}

impl Surface {
    pub fn new(width: u32, height: u32, scale: f32) -> Self {
        Self {
            pixmap: Pixmap::new(width, height),
            scale,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixmap.as_ref().map_or(0, Pixmap::width)
    }

    pub fn height(&self) -> u32 {
        self.pixmap.as_ref().map_or(0, Pixmap::height)
    }

    /// Backing-buffer size in pixels, as `[width, height]`.
    pub fn size(&self) -> [usize; 2] {
        [self.width() as usize, self.height() as usize]
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Premultiplied RGBA bytes, row-major.
    pub fn data(&self) -> &[u8] {
        match &self.pixmap {
            Some(pixmap) => pixmap.data(),
            None => &[],
        }
    }

    /// Straight-alpha color at a pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let color = self.pixmap.as_ref()?.pixel(x, y)?.demultiply();
        Some([color.red(), color.green(), color.blue(), color.alpha()])
    }

    pub fn is_transparent(&self) -> bool {
        self.premultiplied().iter().all(|pixel| pixel.alpha() == 0)
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        demultiplied(self.width(), self.height(), self.premultiplied())
    }

    /// Resets every pixel to fully transparent.
    pub fn clear(&mut self) {
        if let Some(pixmap) = &mut self.pixmap {
            pixmap.fill(Color::TRANSPARENT);
        }
    }

    /// Strokes `points` as one path with round caps and joins, so overlapping
    /// parts of the line are covered once. A single point paints a dot.
    pub fn stroke_polyline(&mut self, points: &[Pos2], style: &StrokeStyle) {
        let transform = self.transform();
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        let Some((&first, rest)) = points.split_first() else {
            return;
        };
        let paint = style.paint();

        if rest.iter().all(|&point| point == first) {
            if let Some(dot) = PathBuilder::from_circle(first.x, first.y, style.width * 0.5) {
                pixmap.fill_path(&dot, &paint, FillRule::Winding, transform, None);
            }
            return;
        }

        let mut builder = PathBuilder::new();
        builder.move_to(first.x, first.y);
        for point in rest {
            builder.line_to(point.x, point.y);
        }
        if let Some(path) = builder.finish() {
            let stroke = Stroke {
                width: style.width,
                line_cap: LineCap::Round,
                line_join: LineJoin::Round,
                ..Stroke::default()
            };
            pixmap.stroke_path(&path, &paint, &stroke, transform, None);
        }
    }

    /// Strokes the outline of the rectangle spanned by two opposite corners.
    pub fn stroke_rect(&mut self, corner: Pos2, opposite: Pos2, style: &StrokeStyle) {
        let min = corner.min(opposite);
        let max = corner.max(opposite);
        let Some(rect) = Rect::from_ltrb(min.x, min.y, max.x, max.y) else {
            return;
        };
        self.stroke_outline(PathBuilder::from_rect(rect), style);
    }

    /// Strokes the outline of a circle.
    pub fn stroke_circle(&mut self, center: Pos2, radius: f32, style: &StrokeStyle) {
        if let Some(path) = PathBuilder::from_circle(center.x, center.y, radius) {
            self.stroke_outline(path, style);
        }
    }

    /// Draws this surface over `target` with source-over blending.
    pub fn composite_onto(&self, target: &mut Surface) {
        if let (Some(source), Some(destination)) = (&self.pixmap, &mut target.pixmap) {
            destination.draw_pixmap(0, 0, source.as_ref(), &PixmapPaint::default(), Transform::identity(), None);
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.width(),
            height: self.height(),
            pixels: Arc::from(self.premultiplied()),
        }
    }

    /// Replaces every pixel with the snapshot's content.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        if snapshot.width != self.width() || snapshot.height != self.height() {
            log::warn!(
                "Restoring {}x{} snapshot onto {}x{} surface",
                snapshot.width,
                snapshot.height,
                self.width(),
                self.height()
            );
            self.pixmap = Pixmap::new(snapshot.width, snapshot.height);
        }
        if let Some(pixmap) = &mut self.pixmap {
            pixmap.pixels_mut().copy_from_slice(&snapshot.pixels);
        }
    }

    fn premultiplied(&self) -> &[PremultipliedColorU8] {
        match &self.pixmap {
            Some(pixmap) => pixmap.pixels(),
            None => &[],
        }
    }

    fn transform(&self) -> Transform {
        Transform::from_scale(self.scale, self.scale)
    }

    fn stroke_outline(&mut self, path: tiny_skia::Path, style: &StrokeStyle) {
        let transform = self.transform();
        if let Some(pixmap) = &mut self.pixmap {
            let stroke = Stroke {
                width: style.width,
                ..Stroke::default()
            };
            pixmap.stroke_path(&path, &style.paint(), &stroke, transform, None);
        }
    }
}

fn demultiplied(width: u32, height: u32, pixels: &[PremultipliedColorU8]) -> RgbaImage {
    let mut image = RgbaImage::new(width, height);
    for (target, source) in image.pixels_mut().zip(pixels) {
        let color = source.demultiply();
        *target = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opaque(color: Color32, width: f32) -> StrokeStyle {
        StrokeStyle { color, width, opacity: 1.0 }
    }

    #[test]
    fn test_new_surface_is_transparent() {
        let surface = Surface::new(4, 3, 1.0);
        assert_eq!(surface.size(), [4, 3]);
        assert!(surface.is_transparent());
    }

    #[test]
    fn test_zero_sized_surface_ignores_drawing() {
        let mut surface = Surface::new(0, 0, 1.0);
        surface.stroke_polyline(&[Pos2::new(0.0, 0.0), Pos2::new(5.0, 5.0)], &opaque(Color32::RED, 3.0));

        assert_eq!(surface.size(), [0, 0]);
        assert!(surface.data().is_empty());
        assert_eq!(surface.snapshot().byte_len(), 0);
    }

    #[test]
    fn test_segment_paints_along_its_path() {
        let mut surface = Surface::new(20, 20, 1.0);
        surface.stroke_polyline(&[Pos2::new(2.0, 10.0), Pos2::new(18.0, 10.0)], &opaque(Color32::RED, 4.0));

        assert_eq!(surface.pixel(10, 10), Some([255, 0, 0, 255]));
        assert_eq!(surface.pixel(10, 2), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_scale_applies_to_positions_and_width() {
        let mut surface = Surface::new(40, 40, 2.0);
        surface.stroke_polyline(&[Pos2::new(10.0, 10.0), Pos2::new(10.0, 10.0)], &opaque(Color32::BLUE, 2.0));

        // user (10, 10) lands on pixel (20, 20)
        assert_eq!(surface.pixel(19, 19), Some([0, 0, 255, 255]));
        assert_eq!(surface.pixel(10, 10), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_rect_outline_leaves_interior_untouched() {
        let mut surface = Surface::new(30, 30, 1.0);
        surface.stroke_rect(Pos2::new(25.0, 25.0), Pos2::new(5.0, 5.0), &opaque(Color32::BLACK, 2.0));

        assert_eq!(surface.pixel(5, 15), Some([0, 0, 0, 255]));
        assert_eq!(surface.pixel(15, 5), Some([0, 0, 0, 255]));
        assert_eq!(surface.pixel(15, 15), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_circle_outline() {
        let mut surface = Surface::new(40, 40, 1.0);
        surface.stroke_circle(Pos2::new(20.0, 20.0), 10.0, &opaque(Color32::GREEN, 4.0));

        assert_eq!(surface.pixel(30, 20), Some([0, 255, 0, 255]));
        assert_eq!(surface.pixel(20, 20), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_opacity_blends_with_existing_pixels() {
        let mut surface = Surface::new(10, 10, 1.0);
        let style = StrokeStyle { color: Color32::BLACK, width: 6.0, opacity: 0.5 };
        surface.stroke_polyline(&[Pos2::new(5.0, 5.0), Pos2::new(5.0, 5.0)], &style);

        let [_, _, _, a] = surface.pixel(5, 5).unwrap();
        assert!((120..=135).contains(&a), "alpha was {a}");
    }

    #[test]
    fn test_translucent_polyline_is_even_at_joints() {
        let mut surface = Surface::new(60, 20, 1.0);
        let style = StrokeStyle { color: Color32::BLACK, width: 6.0, opacity: 0.5 };
        surface.stroke_polyline(&[Pos2::new(5.0, 10.0), Pos2::new(30.0, 10.0), Pos2::new(55.0, 10.0)], &style);

        let middle = surface.pixel(17, 10).unwrap()[3];
        let joint = surface.pixel(30, 10).unwrap()[3];
        assert_eq!(middle, joint);
    }

    #[test]
    fn test_composite_only_changes_painted_pixels() {
        let mut base = Surface::new(10, 10, 1.0);
        base.stroke_polyline(&[Pos2::new(1.0, 1.0), Pos2::new(1.0, 1.0)], &opaque(Color32::RED, 2.0));
        let mut scratch = Surface::new(10, 10, 1.0);
        scratch.stroke_polyline(&[Pos2::new(8.0, 8.0), Pos2::new(8.0, 8.0)], &opaque(Color32::BLUE, 4.0));

        let before = base.pixel(1, 1);
        scratch.composite_onto(&mut base);

        assert_eq!(base.pixel(1, 1), before);
        assert_eq!(base.pixel(7, 7), Some([0, 0, 255, 255]));
    }

    #[test]
    fn test_restore_is_exact() {
        let mut surface = Surface::new(8, 8, 1.0);
        let blank = surface.snapshot();
        surface.stroke_polyline(&[Pos2::new(0.0, 0.0), Pos2::new(8.0, 8.0)], &opaque(Color32::RED, 3.0));
        let drawn = surface.snapshot();
        assert_ne!(drawn, blank);

        surface.restore(&blank);
        assert_eq!(surface.snapshot(), blank);
        surface.restore(&drawn);
        assert_eq!(surface.snapshot(), drawn);
    }

    #[test]
    fn test_rgba_export_is_straight_alpha() {
        let mut surface = Surface::new(10, 10, 1.0);
        let style = StrokeStyle { color: Color32::from_rgb(200, 40, 0), width: 6.0, opacity: 0.5 };
        surface.stroke_polyline(&[Pos2::new(5.0, 5.0), Pos2::new(5.0, 5.0)], &style);

        let image = surface.snapshot().to_rgba_image();
        let Rgba([r, g, _, a]) = *image.get_pixel(5, 5);
        assert!((195..=205).contains(&r), "red was {r}");
        assert!((35..=45).contains(&g), "green was {g}");
        assert!(a < 255);
    }
}
