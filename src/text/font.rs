use std::sync::Arc;

/// Emphasis flags requested for a line of text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl TextStyle {
    /// Parse a comma-separated style list such as `"bold, underline"`.
    ///
    /// Unknown tokens are ignored.
    pub fn parse_list(list: &str) -> Self {
        Self::from_tokens(list.split(','))
    }

    pub fn from_tokens<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Self {
        let mut out = Self::default();
        for tok in tokens {
            match tok.trim().to_ascii_lowercase().as_str() {
                "bold" => out.bold = true,
                "italic" => out.italic = true,
                "underline" => out.underline = true,
                _ => {}
            }
        }
        out
    }

    pub fn variant(self) -> FontVariant {
        FontVariant::from_emphasis(self.bold, self.italic)
    }
}

/// One of the four outline faces a family ships with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontVariant {
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl FontVariant {
    pub const ALL: [FontVariant; 4] = [
        FontVariant::Regular,
        FontVariant::Bold,
        FontVariant::Italic,
        FontVariant::BoldItalic,
    ];

    pub fn from_emphasis(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (true, true) => Self::BoldItalic,
            (true, false) => Self::Bold,
            (false, true) => Self::Italic,
            (false, false) => Self::Regular,
        }
    }

    pub fn is_bold(self) -> bool {
        matches!(self, Self::Bold | Self::BoldItalic)
    }

    pub fn is_italic(self) -> bool {
        matches!(self, Self::Italic | Self::BoldItalic)
    }

    /// File name of the preferred outline font for this variant.
    pub fn preferred_file(self) -> &'static str {
        match self {
            Self::Regular => "arial.ttf",
            Self::Bold => "arialbd.ttf",
            Self::Italic => "ariali.ttf",
            Self::BoldItalic => "arialbi.ttf",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Regular => 0,
            Self::Bold => 1,
            Self::Italic => 2,
            Self::BoldItalic => 3,
        }
    }
}

/// Raw outline font data shared by every size resolved from it.
///
/// The shaping and painting handles point at one shared buffer.
pub struct FaceData {
    label: String,
    variant: FontVariant,
    index: u32,
    blob: parley::fontique::Blob<u8>,
    font_data: vello_cpu::peniko::FontData,
}

impl FaceData {
    pub fn new(label: impl Into<String>, variant: FontVariant, bytes: Vec<u8>, index: u32) -> Self {
        let shared: Arc<dyn AsRef<[u8]> + Send + Sync> = Arc::new(bytes);
        let font_data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::new(Arc::clone(&shared)),
            index,
        );
        Self {
            label: label.into(),
            variant,
            index,
            blob: parley::fontique::Blob::new(shared),
            font_data,
        }
    }

    /// Where the face came from (file path or PostScript name); unique per face.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn variant(&self) -> FontVariant {
        self.variant
    }

    pub fn bytes(&self) -> &[u8] {
        self.blob.data()
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    /// Handle for registering the face with parley; clones share the buffer.
    pub(crate) fn blob(&self) -> &parley::fontique::Blob<u8> {
        &self.blob
    }

    pub(crate) fn font_data(&self) -> &vello_cpu::peniko::FontData {
        &self.font_data
    }
}

impl std::fmt::Debug for FaceData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaceData")
            .field("label", &self.label)
            .field("variant", &self.variant)
            .field("bytes_len", &self.blob.len())
            .field("index", &self.index)
            .finish()
    }
}

/// A renderable font at a concrete pixel size.
#[derive(Clone, Debug)]
pub enum Font {
    /// Outline face shaped with parley and rasterized with vello.
    Outline { face: Arc<FaceData>, size_px: u32 },
    /// Built-in block font, available without any font files.
    Builtin(BuiltinFont),
}

impl Font {
    pub fn size_px(&self) -> u32 {
        match self {
            Self::Outline { size_px, .. } => *size_px,
            Self::Builtin(b) => b.size_px(),
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin(_))
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Outline { face, .. } => face.label(),
            Self::Builtin(_) => "builtin",
        }
    }
}

/// Axis-aligned glyph box relative to the line's top-left origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

/// Last-resort font: fixed-advance solid boxes, one per visible character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuiltinFont {
    size_px: u32,
}

impl BuiltinFont {
    pub const NATIVE_SIZE_PX: u32 = 11;

    /// The built-in font at its native size.
    pub fn native() -> Self {
        Self {
            size_px: Self::NATIVE_SIZE_PX,
        }
    }

    /// The built-in font with its size forced to `size_px` (0 keeps the native size).
    pub fn with_size(size_px: u32) -> Self {
        if size_px == 0 {
            return Self::native();
        }
        Self { size_px }
    }

    pub fn size_px(self) -> u32 {
        self.size_px
    }

    pub fn advance(self) -> f32 {
        self.size_px as f32 * 0.6
    }

    pub fn measure(self, text: &str) -> f32 {
        text.chars().count() as f32 * self.advance()
    }

    pub fn glyph_boxes(self, text: &str) -> Vec<GlyphBox> {
        let size = self.size_px as f32;
        let advance = self.advance();
        text.chars()
            .enumerate()
            .filter(|(_, ch)| !ch.is_whitespace())
            .map(|(i, _)| {
                let x = i as f32 * advance;
                GlyphBox {
                    x0: x + 0.1 * size,
                    y0: 0.2 * size,
                    x1: x + 0.5 * size,
                    y1: 0.9 * size,
                }
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/font.rs"]
mod tests;
