use std::io::Cursor;

use anyhow::Context;
use image::{DynamicImage, ImageFormat, RgbImage, imageops::FilterType};

use crate::foundation::core::Canvas;
use crate::foundation::error::{ThumbError, ThumbResult};
use crate::foundation::opts::ImageLimits;

/// Resampling filter used whenever an image is scaled onto the canonical canvas.
pub const RESAMPLE_FILTER: FilterType = FilterType::Lanczos3;

/// Read width/height from the encoded header without decoding pixel data.
pub fn probe_dimensions(bytes: &[u8]) -> ThumbResult<(u32, u32)> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ThumbError::decode(format!("sniff image format: {e}")))?;
    if reader.format().is_none() {
        return Err(ThumbError::decode("unrecognized image format"));
    }
    reader
        .into_dimensions()
        .map_err(|e| ThumbError::decode(format!("read image dimensions: {e}")))
}

/// Decode encoded image bytes after checking their dimensions against `limits`.
pub fn decode_image(bytes: &[u8], limits: &ImageLimits) -> ThumbResult<DynamicImage> {
    let (width, height) = probe_dimensions(bytes)?;
    limits.check(width, height)?;
    image::load_from_memory(bytes)
        .map_err(|e| ThumbError::decode(format!("decode image from memory: {e}")))
}

/// Decode and convert to the fixed RGB8 color model.
pub fn decode_rgb(bytes: &[u8], limits: &ImageLimits) -> ThumbResult<RgbImage> {
    Ok(decode_image(bytes, limits)?.to_rgb8())
}

/// Resample to exactly `canvas`, ignoring aspect ratio.
pub fn resize_to_canvas(img: &DynamicImage, canvas: Canvas) -> DynamicImage {
    if img.width() == canvas.width && img.height() == canvas.height {
        return img.clone();
    }
    img.resize_exact(canvas.width, canvas.height, RESAMPLE_FILTER)
}

/// Losslessly encode an image as PNG.
pub fn encode_png(img: &DynamicImage) -> ThumbResult<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

/// [`encode_png`] for an RGB8 buffer.
pub fn encode_rgb_png(img: &RgbImage) -> ThumbResult<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
