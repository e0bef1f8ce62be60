use std::sync::Arc;

use image::RgbImage;

use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::{ThumbError, ThumbResult};
use crate::text::font::GlyphBox;
use crate::text::shaper::{LineGlyphs, ShapedLine};

/// Immediate-mode raster target for one thumbnail, backed by `vello_cpu`.
///
/// Everything painted is opaque, so the premultiplied output can be read back as straight RGB.
pub(crate) struct Painter {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
}

impl Painter {
    pub(crate) fn new(canvas: Canvas) -> ThumbResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| ThumbError::render("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| ThumbError::render("canvas height exceeds u16"))?;
        Ok(Self {
            ctx: vello_cpu::RenderContext::new(width, height),
            width,
            height,
        })
    }

    /// Cover the whole canvas with `color`.
    pub(crate) fn fill_background(&mut self, color: Rgb8) {
        let (w, h) = self.size();
        self.fill_rect(0.0, 0.0, w, h, color);
    }

    /// Cover the whole canvas with `img`, which must already be canvas-sized.
    pub(crate) fn draw_background_image(&mut self, img: &RgbImage) -> ThumbResult<()> {
        if img.width() != u32::from(self.width) || img.height() != u32::from(self.height) {
            return Err(ThumbError::render(format!(
                "background is {}x{}, canvas is {}x{}",
                img.width(),
                img.height(),
                self.width,
                self.height
            )));
        }

        let pixels = img
            .pixels()
            .map(|p| vello_cpu::peniko::color::PremulRgba8 {
                r: p[0],
                g: p[1],
                b: p[2],
                a: 255,
            })
            .collect();
        let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, self.width, self.height, false);
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };

        let (w, h) = self.size();
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(paint);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
        Ok(())
    }

    pub(crate) fn fill_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgb8) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.set_color(color);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(x0, y0, x1, y1));
    }

    /// Fill the glyphs of `line` with their top-left origin at `(x, y)`.
    pub(crate) fn fill_text(&mut self, line: &ShapedLine, x: f32, y: f32, color: Rgb8) {
        self.set_color(color);
        match &line.glyphs {
            LineGlyphs::Outline {
                face,
                font_size,
                glyphs,
            } => {
                self.ctx.set_transform(translate(x, y));
                let glyphs = glyphs.iter().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(face.font_data())
                    .font_size(*font_size)
                    .fill_glyphs(glyphs);
            }
            LineGlyphs::Boxes(boxes) => self.fill_boxes(boxes, x, y, 0.0),
        }
    }

    /// Outline the glyphs of `line` with a pen `width` pixels wide, centered on the glyph edges.
    pub(crate) fn stroke_text(&mut self, line: &ShapedLine, x: f32, y: f32, width: f32, color: Rgb8) {
        self.set_color(color);
        match &line.glyphs {
            LineGlyphs::Outline {
                face,
                font_size,
                glyphs,
            } => {
                self.ctx.set_transform(translate(x, y));
                self.ctx
                    .set_stroke(vello_cpu::kurbo::Stroke::new(f64::from(width)));
                let glyphs = glyphs.iter().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(face.font_data())
                    .font_size(*font_size)
                    .stroke_glyphs(glyphs);
            }
            LineGlyphs::Boxes(boxes) => self.fill_boxes(boxes, x, y, width / 2.0),
        }
    }

    /// Rasterize everything painted so far into an RGB8 buffer.
    pub(crate) fn finish(mut self) -> ThumbResult<RgbImage> {
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);

        let rgb: Vec<u8> = pixmap
            .data_as_u8_slice()
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        RgbImage::from_raw(u32::from(self.width), u32::from(self.height), rgb)
            .ok_or_else(|| ThumbError::render("rendered pixmap has unexpected length"))
    }

    fn fill_boxes(&mut self, boxes: &[GlyphBox], x: f32, y: f32, grow: f32) {
        self.ctx.set_transform(translate(x, y));
        for b in boxes {
            self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                f64::from(b.x0 - grow),
                f64::from(b.y0 - grow),
                f64::from(b.x1 + grow),
                f64::from(b.y1 + grow),
            ));
        }
    }

    fn set_color(&mut self, c: Rgb8) {
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, 255));
    }

    fn size(&self) -> (f64, f64) {
        (f64::from(self.width), f64::from(self.height))
    }
}

fn translate(x: f32, y: f32) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::translate((f64::from(x), f64::from(y)))
}

#[cfg(test)]
#[path = "../../tests/unit/render/painter.rs"]
mod tests;
