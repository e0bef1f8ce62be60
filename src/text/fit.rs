use std::borrow::Cow;

use crate::foundation::core::Canvas;
use crate::foundation::error::ThumbResult;
use crate::text::font::{Font, TextStyle};
use crate::text::provider::FontResolver;
use crate::text::shaper::{ShapedLine, TextShaper};

/// Smallest size the fitter shrinks text to, even if it still overflows.
pub const FIT_FLOOR_PX: u32 = 18;
/// Size decrement per fitting step.
pub const FIT_STEP_PX: u32 = 2;
/// Baseline correction: the draw origin sits this many font sizes above the anchor.
pub const ASCENT_CORRECTION: f32 = 0.6;

/// Outcome of [`fit_text`].
#[derive(Clone, Debug)]
pub struct FittedText {
    pub font: Font,
    pub width: f32,
}

/// Shrink `initial` until `text` fits in `max_width`, or the size reaches [`FIT_FLOOR_PX`].
///
/// Linear search in [`FIT_STEP_PX`] steps, re-resolving through `fonts` each step so emphasis
/// stays applied. Width is not guaranteed monotonic in size once fallback fonts are involved,
/// which is why this does not bisect. Text that already fits keeps its size.
pub fn fit_text(
    shaper: &mut TextShaper,
    fonts: &FontResolver,
    text: &str,
    initial: Font,
    max_width: f32,
    style: TextStyle,
) -> ThumbResult<FittedText> {
    let mut font = initial;
    let mut width = shaper.measure(text, &font)?;
    let requested = font.size_px();

    while width > max_width && font.size_px() > FIT_FLOOR_PX {
        let size = font
            .size_px()
            .saturating_sub(FIT_STEP_PX)
            .max(FIT_FLOOR_PX);
        font = fonts.resolve(size, style.bold, style.italic);
        width = shaper.measure(text, &font)?;
    }

    if font.size_px() != requested {
        tracing::debug!(
            requested,
            fitted = font.size_px(),
            width,
            max_width,
            "shrunk text to fit"
        );
    }

    Ok(FittedText { font, width })
}

/// A positioned, shaped line ready to paint.
#[derive(Clone, Debug)]
pub struct RenderedLine {
    pub text: String,
    pub font_size: u32,
    pub width: f32,
    /// Top-left draw origin.
    pub x: f32,
    pub y: f32,
    pub(crate) shaped: ShapedLine,
}

/// Collapse line breaks so titles always lay out as one line.
pub fn single_line(text: &str) -> Cow<'_, str> {
    if !text.contains(['\r', '\n']) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", " ").replace(['\r', '\n'], " "))
}

/// Fit `text` at `size_px` and center it horizontally with its vertical center at `anchor_y`.
pub fn layout_line(
    shaper: &mut TextShaper,
    fonts: &FontResolver,
    canvas: Canvas,
    text: &str,
    size_px: u32,
    style: TextStyle,
    anchor_y: f32,
) -> ThumbResult<RenderedLine> {
    let text = single_line(text);
    let initial = fonts.resolve(size_px, style.bold, style.italic);
    let fitted = fit_text(
        shaper,
        fonts,
        &text,
        initial,
        canvas.max_text_width(),
        style,
    )?;

    let shaped = shaper.shape(&text, &fitted.font)?;
    let font_size = fitted.font.size_px();
    let x = ((canvas.width as f32 - fitted.width) / 2.0).floor();
    let y = (anchor_y - font_size as f32 * ASCENT_CORRECTION).trunc();

    Ok(RenderedLine {
        text: text.into_owned(),
        font_size,
        width: fitted.width,
        x,
        y,
        shaped,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/text/fit.rs"]
mod tests;
