//! Inline HTML embedding of pixel arrays through `data:` URIs.

use std::fmt;
use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::ImageFormat;

use super::array::PixelArray;
use super::error::ImageError;

/// CSS asking the browser to scale with nearest-neighbor interpolation.
pub const NEAREST_STYLE: &str = "image-rendering: -moz-crisp-edges; \
image-rendering: -o-crisp-edges; \
image-rendering: -webkit-optimize-contrast; \
image-rendering: pixelated; \
-ms-interpolation-mode: nearest-neighbor;";

/// An encoded image wrapped in an `<img>` tag, ready to drop into an HTML
/// document or a notebook cell.
#[derive(Debug, Clone)]
pub struct EmbeddedImage {
    html: String,
    width: u32,
    height: u32,
}

impl EmbeddedImage {
    /// Encode `arr` and build its `<img>` tag.
    ///
    /// * `scale` - display size relative to the pixel size; 0.5 or smaller
    ///   suits HiDPI screens
    /// * `format` - container format by extension (`png`, `jpeg`, `bmp`, ...)
    /// * `nearest` - render scaled pixels as crisp blocks
    pub fn new(
        arr: &PixelArray,
        scale: f64,
        format: &str,
        nearest: bool,
    ) -> Result<Self, ImageError> {
        let format = ImageFormat::from_extension(format)
            .ok_or_else(|| ImageError::UnknownFormat(format.to_string()))?;
        Self::with_format(arr, scale, format, nearest)
    }

    pub fn with_format(
        arr: &PixelArray,
        scale: f64,
        format: ImageFormat,
        nearest: bool,
    ) -> Result<Self, ImageError> {
        let img = arr.clone().squeeze_channels().to_dynamic_image()?;

        let mut encoded = Cursor::new(Vec::new());
        img.write_to(&mut encoded, format)?;
        let data = STANDARD.encode(encoded.into_inner());

        let width = (f64::from(img.width()) * scale).round_ties_even() as u32;
        let height = (f64::from(img.height()) * scale).round_ties_even() as u32;
        let style = if nearest { NEAREST_STYLE } else { "" };
        let html = format!(
            r#"<img width="{}" height="{}" style="{}" src="data:{};base64,{}">"#,
            width,
            height,
            style,
            format.to_mime_type(),
            data
        );

        Ok(Self {
            html,
            width,
            height,
        })
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Display width in CSS pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Display height in CSS pixels.
    pub fn height(&self) -> u32 {
        self.height
    }
}

impl fmt::Display for EmbeddedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.html)
    }
}
