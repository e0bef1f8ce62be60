use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::assets::decode::{decode_image, encode_png, probe_dimensions, resize_to_canvas};
use crate::foundation::core::Canvas;
use crate::foundation::error::{ThumbError, ThumbResult};
use crate::foundation::opts::ImageLimits;

/// An encoded image normalized to the canonical canvas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IngestedCanvas {
    /// Original payload when it already had canonical dimensions, otherwise a fresh PNG.
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub resized: bool,
}

/// Decode a `header,base64payload` data URL exported by a browser canvas.
///
/// A payload that already measures 1280×720 is returned byte for byte; anything else is
/// resampled onto the canonical canvas and re-encoded as PNG.
pub fn ingest_data_url(data_url: &str, limits: &ImageLimits) -> ThumbResult<IngestedCanvas> {
    let payload = decode_data_url(data_url)?;

    let (width, height) = probe_dimensions(&payload)?;
    limits.check(width, height)?;

    let canvas = Canvas::THUMBNAIL;
    if width == canvas.width && height == canvas.height {
        tracing::debug!(bytes = payload.len(), "canvas already canonical, passing through");
        return Ok(IngestedCanvas {
            bytes: payload,
            width,
            height,
            resized: false,
        });
    }

    tracing::debug!(width, height, "resampling canvas to canonical size");
    let img = decode_image(&payload, limits)?;
    let resized = resize_to_canvas(&img, canvas);
    Ok(IngestedCanvas {
        bytes: encode_png(&resized)?,
        width: canvas.width,
        height: canvas.height,
        resized: true,
    })
}

/// Split a data URL and decode its base64 payload.
pub fn decode_data_url(data_url: &str) -> ThumbResult<Vec<u8>> {
    let (header, encoded) = data_url
        .split_once(',')
        .ok_or_else(|| ThumbError::invalid_input("invalid or missing canvas data"))?;
    if !header.contains("base64") {
        return Err(ThumbError::invalid_input("canvas data must be base64"));
    }

    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = BASE64
        .decode(compact.as_bytes())
        .map_err(|e| ThumbError::invalid_input(format!("canvas payload is not valid base64: {e}")))?;
    if bytes.is_empty() {
        return Err(ThumbError::invalid_input("canvas payload is empty"));
    }
    Ok(bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/render/ingest.rs"]
mod tests;
