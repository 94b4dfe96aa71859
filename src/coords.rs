//! Mapping from viewport positions to drawing-surface coordinates.

use egui::{Pos2, Rect};

/// Where the surface sits on screen and how big its backing buffer is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceLayout {
    /// On-screen rect of the canvas, in points.
    pub rect: Rect,
    /// Physical pixels per point.
    pub device_pixel_ratio: f32,
    /// Backing-buffer size in pixels, as `[width, height]`.
    pub buffer_size: [usize; 2],
}

impl SurfaceLayout {
    pub fn new(rect: Rect, device_pixel_ratio: f32, buffer_size: [usize; 2]) -> Self {
        Self {
            rect,
            device_pixel_ratio: normalize_pixel_ratio(device_pixel_ratio),
            buffer_size,
        }
    }

    /// Layout for a canvas whose buffer exactly covers `rect` at `device_pixel_ratio`.
    pub fn fitted(rect: Rect, device_pixel_ratio: f32) -> Self {
        let ratio = normalize_pixel_ratio(device_pixel_ratio);
        let buffer_size = [
            (rect.width() * ratio).round().max(0.0) as usize,
            (rect.height() * ratio).round().max(0.0) as usize,
        ];
        Self::new(rect, ratio, buffer_size)
    }

    pub fn map(&self, client: Pos2) -> Option<Pos2> {
        map_to_surface(client, self.rect, self.device_pixel_ratio, self.buffer_size)
    }

    pub fn contains(&self, client: Pos2) -> bool {
        self.rect.contains(client)
    }
}

/// Falls back to 1.0 when the ratio is unavailable or nonsensical.
pub fn normalize_pixel_ratio(ratio: f32) -> f32 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    }
}

/// Converts a viewport position into surface user-space coordinates.
///
/// Both the element-to-buffer stretch (`buffer / rect`) and the device pixel
/// ratio are folded into one factor per axis. Returns `None` when the rect has
/// no area, i.e. the canvas is hidden or not laid out yet.
pub fn map_to_surface(client: Pos2, rect: Rect, device_pixel_ratio: f32, buffer_size: [usize; 2]) -> Option<Pos2> {
    let (width, height) = (rect.width(), rect.height());
    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        return None;
    }
    let ratio = normalize_pixel_ratio(device_pixel_ratio);
    let local = client - rect.min;
    Some(Pos2::new(
        local.x * (buffer_size[0] as f32 / width / ratio),
        local.y * (buffer_size[1] as f32 / height / ratio),
    ))
}
