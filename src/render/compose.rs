use std::sync::Arc;

use image::RgbImage;

use crate::assets::decode::{decode_image, resize_to_canvas};
use crate::assets::upload::allowed_file;
use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::ThumbResult;
use crate::foundation::opts::ImageLimits;
use crate::render::painter::Painter;
use crate::request::{BackgroundKind, ThumbnailRequest};
use crate::text::fit::{RenderedLine, layout_line};
use crate::text::font::TextStyle;
use crate::text::provider::FontResolver;
use crate::text::shaper::TextShaper;

/// Vertical centers of the title and subtitle, as fractions of canvas height.
pub const TITLE_ANCHOR: f32 = 0.38;
pub const SUBTITLE_ANCHOR: f32 = 0.60;

/// Outline drawn around bold text, independent of the text color.
pub const BOLD_STROKE_COLOR: Rgb8 = Rgb8::BLACK;
/// Outline width in pixels outside the glyph edge.
pub const BOLD_STROKE_PX: f32 = 2.0;

pub const UNDERLINE_THICKNESS_PX: f32 = 2.0;
/// Underline offset below the draw origin, in font sizes.
pub const UNDERLINE_OFFSET: f32 = 1.05;

/// Lays out and paints simple-mode thumbnails onto the canonical canvas.
#[derive(Clone, Debug)]
pub struct Compositor {
    fonts: Arc<FontResolver>,
    limits: ImageLimits,
    canvas: Canvas,
}

impl Compositor {
    pub fn new(fonts: Arc<FontResolver>, limits: ImageLimits) -> Self {
        Self {
            fonts,
            limits,
            canvas: Canvas::THUMBNAIL,
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Fit both lines of `req` without painting anything.
    pub fn layout(&self, req: &ThumbnailRequest) -> ThumbResult<(RenderedLine, RenderedLine)> {
        let mut shaper = TextShaper::new();
        self.layout_with(&mut shaper, req)
    }

    /// Render `req` into a fresh 1280×720 RGB raster.
    #[tracing::instrument(skip(self, req), fields(bg = ?req.bg_type))]
    pub fn compose(&self, req: &ThumbnailRequest) -> ThumbResult<RgbImage> {
        let mut painter = Painter::new(self.canvas)?;

        match self.background_image(req) {
            Some(bg) => painter.draw_background_image(&bg)?,
            None => painter.fill_background(req.bg_color),
        }

        let mut shaper = TextShaper::new();
        let (title, subtitle) = self.layout_with(&mut shaper, req)?;
        for line in [&title, &subtitle] {
            draw_line(&mut painter, line, req);
        }

        painter.finish()
    }

    fn layout_with(
        &self,
        shaper: &mut TextShaper,
        req: &ThumbnailRequest,
    ) -> ThumbResult<(RenderedLine, RenderedLine)> {
        let height = self.canvas.height as f32;
        let title = layout_line(
            shaper,
            &self.fonts,
            self.canvas,
            &req.title,
            req.title_size,
            req.text_styles,
            height * TITLE_ANCHOR,
        )?;
        let subtitle = layout_line(
            shaper,
            &self.fonts,
            self.canvas,
            &req.subtitle,
            req.subtitle_size,
            req.text_styles,
            height * SUBTITLE_ANCHOR,
        )?;
        Ok((title, subtitle))
    }

    // An unusable background image degrades to the solid color.
    fn background_image(&self, req: &ThumbnailRequest) -> Option<RgbImage> {
        if req.bg_type != BackgroundKind::Image {
            return None;
        }
        let Some(upload) = &req.bg_image else {
            tracing::warn!("image background requested without an image, using bg_color");
            return None;
        };
        if !allowed_file(&upload.filename) {
            tracing::warn!(filename = %upload.filename, "background image extension not allowed, using bg_color");
            return None;
        }
        match decode_image(&upload.bytes, &self.limits) {
            Ok(img) => Some(resize_to_canvas(&img, self.canvas).to_rgb8()),
            Err(e) => {
                tracing::warn!(filename = %upload.filename, error = %e, "background image unusable, using bg_color");
                None
            }
        }
    }
}

fn draw_line(painter: &mut Painter, line: &RenderedLine, req: &ThumbnailRequest) {
    let TextStyle {
        bold, underline, ..
    } = req.text_styles;

    if req.shadow_enabled {
        painter.fill_text(
            &line.shaped,
            line.x + req.shadow_offset.x as f32,
            line.y + req.shadow_offset.y as f32,
            req.shadow_color,
        );
    }

    if bold {
        // Centered pen, so twice the outset.
        painter.stroke_text(
            &line.shaped,
            line.x,
            line.y,
            BOLD_STROKE_PX * 2.0,
            BOLD_STROKE_COLOR,
        );
    }
    painter.fill_text(&line.shaped, line.x, line.y, req.text_color);

    if underline {
        let uy = f64::from(line.y) + (line.font_size as f32 * UNDERLINE_OFFSET).trunc() as f64;
        let half = f64::from(UNDERLINE_THICKNESS_PX) / 2.0;
        painter.fill_rect(
            f64::from(line.x),
            uy - half,
            f64::from(line.x + line.width),
            uy + half,
            req.text_color,
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compose.rs"]
mod tests;
