use std::path::PathBuf;

use crate::foundation::error::{ThumbError, ThumbResult};

/// Process-wide, read-only configuration injected into [`crate::Thumbnailer`].
///
/// Built once at startup (defaults, then environment, then CLI flags) and never mutated by the
/// rendering core.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ThumbforgeOpts {
    /// Where outline fonts are looked up.
    pub fonts: FontOpts,
    /// Upper bounds on accepted image sizes.
    pub limits: ImageLimits,
    /// Directory accepted uploads are archived into. `None` disables archiving.
    pub upload_dir: Option<PathBuf>,
}

impl ThumbforgeOpts {
    /// Defaults overridden by `THUMBFORGE_*` environment variables.
    ///
    /// Unparseable values are ignored and the default is kept.
    pub fn from_env() -> Self {
        let mut opts = Self::default();

        if let Some(dirs) = std::env::var_os("THUMBFORGE_FONT_DIRS") {
            let dirs: Vec<PathBuf> = std::env::split_paths(&dirs)
                .filter(|p| !p.as_os_str().is_empty())
                .collect();
            if !dirs.is_empty() {
                opts.fonts.font_dirs = dirs;
            }
        }
        if let Some(on) = std::env::var("THUMBFORGE_SYSTEM_FONTS")
            .ok()
            .and_then(|v| parse_bool(&v))
        {
            opts.fonts.system_fonts = on;
        }
        if let Some(dim) = std::env::var("THUMBFORGE_MAX_IMAGE_DIM")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|&n| n > 0)
        {
            opts.limits.max_width = dim;
            opts.limits.max_height = dim;
        }
        if let Some(px) = std::env::var("THUMBFORGE_MAX_IMAGE_PIXELS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|&n| n > 0)
        {
            opts.limits.max_pixels = px;
        }
        if let Some(dir) = std::env::var_os("THUMBFORGE_UPLOAD_DIR").filter(|v| !v.is_empty()) {
            opts.upload_dir = Some(PathBuf::from(dir));
        }

        opts
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Font lookup configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontOpts {
    /// Directories searched (non-recursively) for the preferred font files.
    pub font_dirs: Vec<PathBuf>,
    /// Query the system font database when a preferred file is missing.
    pub system_fonts: bool,
}

impl Default for FontOpts {
    fn default() -> Self {
        Self {
            font_dirs: vec![
                PathBuf::from("."),
                PathBuf::from("fonts"),
                PathBuf::from("/usr/share/fonts/truetype/msttcorefonts"),
                PathBuf::from("/usr/share/fonts/TTF"),
                PathBuf::from("/Library/Fonts"),
                PathBuf::from("C:\\Windows\\Fonts"),
            ],
            system_fonts: true,
        }
    }
}

/// Dimension guard applied before any image is decoded or resampled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageLimits {
    pub max_width: u32,
    pub max_height: u32,
    pub max_pixels: u64,
}

impl Default for ImageLimits {
    fn default() -> Self {
        Self {
            max_width: 8192,
            max_height: 8192,
            max_pixels: 40_000_000,
        }
    }
}

impl ImageLimits {
    /// Reject empty images and images outside the configured bounds.
    pub fn check(&self, width: u32, height: u32) -> ThumbResult<()> {
        if width == 0 || height == 0 {
            return Err(ThumbError::invalid_input("image has zero width or height"));
        }
        if width > self.max_width || height > self.max_height {
            return Err(ThumbError::invalid_input(format!(
                "image is {width}x{height}, larger than the {}x{} limit",
                self.max_width, self.max_height
            )));
        }
        let pixels = u64::from(width) * u64::from(height);
        if pixels > self.max_pixels {
            return Err(ThumbError::invalid_input(format!(
                "image has {pixels} pixels, more than the {} pixel limit",
                self.max_pixels
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/opts.rs"]
mod tests;
