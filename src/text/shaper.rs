use std::collections::{HashMap, hash_map::Entry};
use std::sync::Arc;

use crate::foundation::error::{ThumbError, ThumbResult};
use crate::text::font::{FaceData, Font, GlyphBox};

/// Glyph id plus its position relative to the line's top-left origin (y is the baseline).
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PlacedGlyph {
    pub(crate) id: u32,
    pub(crate) x: f32,
    pub(crate) y: f32,
}

/// Paintable glyph data for one shaped line.
#[derive(Clone, Debug)]
pub(crate) enum LineGlyphs {
    Outline {
        face: Arc<FaceData>,
        font_size: f32,
        glyphs: Vec<PlacedGlyph>,
    },
    Boxes(Vec<GlyphBox>),
}

/// A single line of text shaped at one font size.
#[derive(Clone, Debug)]
pub struct ShapedLine {
    /// Advance width in pixels, trailing whitespace included.
    pub width: f32,
    pub(crate) glyphs: LineGlyphs,
}

struct RegisteredFace {
    font_ctx: parley::FontContext,
    family_name: String,
    weight: parley::style::FontWeight,
    style: parley::style::FontStyle,
}

impl RegisteredFace {
    /// Register `face`'s blob and pin the family, weight and style of the face at its own
    /// collection index, so shaping and painting use the same face.
    fn register(face: &FaceData) -> ThumbResult<Self> {
        // Only the registered blob; a same-named system family must not shadow it.
        let mut font_ctx = parley::FontContext {
            collection: parley::fontique::Collection::new(parley::fontique::CollectionOptions {
                shared: false,
                system_fonts: false,
            }),
            source_cache: parley::fontique::SourceCache::default(),
        };
        let families = font_ctx
            .collection
            .register_fonts(face.blob().clone(), None);
        let (family_id, weight, style) = families
            .iter()
            .find_map(|(id, infos)| {
                infos
                    .iter()
                    .find(|info| info.index() == face.index())
                    .map(|info| (*id, info.weight(), info.style()))
            })
            .ok_or_else(|| {
                ThumbError::render(format!(
                    "no face at index {} registered from '{}'",
                    face.index(),
                    face.label()
                ))
            })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ThumbError::render("registered font family has no name"))?
            .to_string();
        Ok(Self {
            font_ctx,
            family_name,
            weight,
            style,
        })
    }
}

/// Request-scoped single-line shaper.
///
/// Each outline face gets its own parley font context, so emphasis variants of one family can
/// never be substituted for each other.
pub struct TextShaper {
    layout_ctx: parley::LayoutContext<()>,
    faces: HashMap<String, RegisteredFace>,
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TextShaper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextShaper")
            .field("faces", &self.faces.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl TextShaper {
    pub fn new() -> Self {
        Self {
            layout_ctx: parley::LayoutContext::new(),
            faces: HashMap::new(),
        }
    }

    /// Rendered width of `text` in `font`, in pixels.
    pub fn measure(&mut self, text: &str, font: &Font) -> ThumbResult<f32> {
        match font {
            Font::Builtin(b) => Ok(b.measure(text)),
            Font::Outline { .. } => Ok(self.shape(text, font)?.width),
        }
    }

    /// Shape `text` as one unbroken line.
    pub fn shape(&mut self, text: &str, font: &Font) -> ThumbResult<ShapedLine> {
        match font {
            Font::Builtin(b) => Ok(ShapedLine {
                width: b.measure(text),
                glyphs: LineGlyphs::Boxes(b.glyph_boxes(text)),
            }),
            Font::Outline { face, size_px } => self.shape_outline(text, face, *size_px as f32),
        }
    }

    fn shape_outline(
        &mut self,
        text: &str,
        face: &Arc<FaceData>,
        size_px: f32,
    ) -> ThumbResult<ShapedLine> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ThumbError::invalid_input("font size must be finite and > 0"));
        }

        let registered = match self.faces.entry(face.label().to_string()) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => e.insert(RegisteredFace::register(face)?),
        };

        let family_name = registered.family_name.clone();
        let (weight, style) = (registered.weight, registered.style);

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut registered.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontWeight(weight));
        builder.push_default(parley::style::StyleProperty::FontStyle(style));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);

        let mut font_size = size_px;
        let mut glyphs = Vec::new();
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                font_size = run.run().font_size();
                glyphs.extend(run.positioned_glyphs().map(|g| PlacedGlyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                }));
            }
        }

        Ok(ShapedLine {
            width: layout.full_width(),
            glyphs: LineGlyphs::Outline {
                face: Arc::clone(face),
                font_size,
                glyphs,
            },
        })
    }
}
