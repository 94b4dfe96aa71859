use std::io::Cursor;

use egui::Color32;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use serde::{Deserialize, Serialize};

use crate::config::PaintConfig;
use crate::error::{PaintError, PaintResult};
use crate::surface::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
    Webp,
    Bmp,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [ExportFormat::Png, ExportFormat::Jpeg, ExportFormat::Webp, ExportFormat::Bmp];

    /// Parses a format tag such as `"png"` or `"image/jpeg"`.
    ///
    /// Unknown tags are rejected up front instead of producing an empty file.
    pub fn from_tag(tag: &str) -> PaintResult<Self> {
        let normalized = tag.trim().to_ascii_lowercase();
        let name = normalized.strip_prefix("image/").unwrap_or(&normalized);
        match name {
            "png" => Ok(Self::Png),
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "webp" => Ok(Self::Webp),
            "bmp" => Ok(Self::Bmp),
            _ => Err(PaintError::UnsupportedFormat(tag.to_owned())),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Png => "PNG",
            ExportFormat::Jpeg => "JPEG",
            ExportFormat::Webp => "WebP",
            ExportFormat::Bmp => "BMP",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Webp => "webp",
            ExportFormat::Bmp => "bmp",
        }
    }

    pub fn image_format(&self) -> ImageFormat {
        match self {
            ExportFormat::Png => ImageFormat::Png,
            ExportFormat::Jpeg => ImageFormat::Jpeg,
            ExportFormat::Webp => ImageFormat::WebP,
            ExportFormat::Bmp => ImageFormat::Bmp,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        self.image_format().to_mime_type()
    }

    /// JPEG has no alpha channel, so the canvas is flattened onto the background.
    pub fn supports_alpha(&self) -> bool {
        !matches!(self, ExportFormat::Jpeg)
    }

    pub fn file_name(&self, stem: &str) -> String {
        format!("{}.{}", stem, self.extension())
    }
}

impl TryFrom<String> for ExportFormat {
    type Error = PaintError;

    fn try_from(tag: String) -> PaintResult<Self> {
        Self::from_tag(&tag)
    }
}

/// Encodes a committed snapshot with the `image` crate's encoder for `format`.
pub fn encode(snapshot: &Snapshot, format: ExportFormat, background: Color32) -> PaintResult<Vec<u8>> {
    let image = if format.supports_alpha() {
        DynamicImage::ImageRgba8(snapshot.to_rgba_image())
    } else {
        DynamicImage::ImageRgb8(flatten(snapshot, background))
    };
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, format.image_format())?;
    Ok(bytes.into_inner())
}

/// Composites the snapshot over an opaque background.
fn flatten(snapshot: &Snapshot, background: Color32) -> RgbImage {
    let pixels = snapshot.to_rgba_image();
    let [br, bg, bb, _] = background.to_srgba_unmultiplied();
    RgbImage::from_fn(pixels.width(), pixels.height(), |x, y| {
        let [r, g, b, a] = pixels.get_pixel(x, y).0;
        let alpha = a as f32 / 255.0;
        let mix = |c: u8, base: u8| (c as f32 * alpha + base as f32 * (1.0 - alpha)).round() as u8;
        Rgb([mix(r, br), mix(g, bg), mix(b, bb)])
    })
}

/// Writes the snapshot to `<export_dir>/<filename>.<ext>`.
#[cfg(not(target_arch = "wasm32"))]
pub fn save(snapshot: &Snapshot, filename: &str, format: ExportFormat, config: &PaintConfig) -> PaintResult<()> {
    let bytes = encode(snapshot, format, config.background)?;
    let path = config.export_dir.join(format.file_name(filename));
    std::fs::write(&path, &bytes)?;
    log::info!("Saved {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

/// Offers the snapshot to the browser as a file download.
#[cfg(target_arch = "wasm32")]
pub fn save(snapshot: &Snapshot, filename: &str, format: ExportFormat, config: &PaintConfig) -> PaintResult<()> {
    let bytes = encode(snapshot, format, config.background)?;
    let file_name = format.file_name(filename);
    download(&bytes, &file_name, format.mime_type())?;
    log::info!("Downloaded {} ({} bytes)", file_name, bytes.len());
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn download(bytes: &[u8], file_name: &str, mime: &str) -> PaintResult<()> {
    use eframe::wasm_bindgen::{JsCast as _, JsValue};

    let js_error = |err: JsValue| PaintError::Download(format!("{err:?}"));

    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_error)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_error)?;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| PaintError::Download("no document available".to_owned()))?;
    let anchor = document
        .create_element("a")
        .map_err(js_error)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| PaintError::Download("could not create download link".to_owned()))?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    web_sys::Url::revoke_object_url(&url).map_err(js_error)
}
