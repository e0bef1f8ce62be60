use std::str::FromStr;

use image::{Rgb, RgbImage};

use crate::foundation::error::{ThumbError, ThumbResult};

/// The five supported whole-image filters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Brightness,
    Contrast,
    Saturate,
    Sepia,
    Grayscale,
}

impl FilterKind {
    pub const ALL: [FilterKind; 5] = [
        FilterKind::Brightness,
        FilterKind::Contrast,
        FilterKind::Saturate,
        FilterKind::Sepia,
        FilterKind::Grayscale,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Brightness => "brightness",
            Self::Contrast => "contrast",
            Self::Saturate => "saturate",
            Self::Sepia => "sepia",
            Self::Grayscale => "grayscale",
        }
    }

    /// Whether `intensity` changes the output of this filter at all.
    pub fn uses_intensity(self) -> bool {
        matches!(self, Self::Brightness | Self::Contrast | Self::Saturate)
    }
}

impl FromStr for FilterKind {
    type Err = ThumbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.name() == key)
            .ok_or_else(|| ThumbError::unsupported_filter(format!("'{s}'")))
    }
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Apply `kind` to `img`, producing a new image of the same size.
///
/// `intensity` is a factor where 1.0 is the identity for brightness, contrast and saturate.
/// Sepia and grayscale ignore it.
pub fn apply_filter(img: &RgbImage, kind: FilterKind, intensity: f32) -> ThumbResult<RgbImage> {
    if !intensity.is_finite() || intensity < 0.0 {
        return Err(ThumbError::invalid_input(format!(
            "filter intensity must be finite and >= 0, got {intensity}"
        )));
    }

    Ok(match kind {
        FilterKind::Brightness => enhance(img, intensity, |_| [0, 0, 0]),
        FilterKind::Contrast => {
            let gray = mean_luma(img);
            enhance(img, intensity, |_| [gray, gray, gray])
        }
        FilterKind::Saturate => enhance(img, intensity, |px| {
            let l = luma(px);
            [l, l, l]
        }),
        FilterKind::Sepia => map_pixels(img, sepia),
        FilterKind::Grayscale => map_pixels(img, |px| {
            let l = luma(px);
            [l, l, l]
        }),
    })
}

/// ITU-R 601-2 luma in 16.16 fixed point, rounded.
pub fn luma(px: [u8; 3]) -> u8 {
    let [r, g, b] = px.map(u32::from);
    ((19595 * r + 38470 * g + 7471 * b + 0x8000) >> 16) as u8
}

/// Fixed sepia tone matrix; channel sums are truncated and capped at 255.
pub fn sepia(px: [u8; 3]) -> [u8; 3] {
    let [r, g, b] = px.map(f64::from);
    let tone = |wr: f64, wg: f64, wb: f64| (wr * r + wg * g + wb * b).min(255.0) as u8;
    [
        tone(0.393, 0.769, 0.189),
        tone(0.349, 0.686, 0.168),
        tone(0.272, 0.534, 0.131),
    ]
}

// Interpolate from a degenerate image toward the input: `d + f * (c - d)`.
fn enhance(img: &RgbImage, factor: f32, degenerate: impl Fn([u8; 3]) -> [u8; 3]) -> RgbImage {
    map_pixels(img, |px| {
        let d = degenerate(px);
        std::array::from_fn(|i| blend_channel(d[i], px[i], factor))
    })
}

fn blend_channel(d: u8, c: u8, factor: f32) -> u8 {
    let v = f32::from(d) + factor * (f32::from(c) - f32::from(d));
    if v <= 0.0 {
        0
    } else if v >= 255.0 {
        255
    } else {
        v as u8
    }
}

fn mean_luma(img: &RgbImage) -> u8 {
    let n = u64::from(img.width()) * u64::from(img.height());
    if n == 0 {
        return 0;
    }
    let sum: u64 = img.pixels().map(|p| u64::from(luma(p.0))).sum();
    (sum as f64 / n as f64 + 0.5) as u8
}

fn map_pixels(img: &RgbImage, f: impl Fn([u8; 3]) -> [u8; 3]) -> RgbImage {
    let mut out = RgbImage::new(img.width(), img.height());
    for (dst, src) in out.pixels_mut().zip(img.pixels()) {
        *dst = Rgb(f(src.0));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/effects/filter.rs"]
mod tests;
