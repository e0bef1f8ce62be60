use serde::{Deserialize, Serialize};

use crate::assets::color::parse_color;
use crate::assets::templates::TemplateDescriptor;
use crate::effects::filter::FilterKind;
use crate::foundation::core::Rgb8;
use crate::foundation::error::{ThumbError, ThumbResult};
use crate::text::font::TextStyle;

/// Largest accepted title or subtitle size, in pixels.
pub const MAX_FONT_SIZE_PX: u32 = 1000;

/// Which background source a thumbnail uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    #[default]
    Color,
    Image,
}

/// Pixel delta of the drop shadow relative to the text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShadowOffset {
    pub x: i32,
    pub y: i32,
}

impl Default for ShadowOffset {
    fn default() -> Self {
        Self { x: 2, y: 2 }
    }
}

/// An uploaded background image as received, before any decoding.
#[derive(Clone, PartialEq, Eq)]
pub struct BackgroundImage {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for BackgroundImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundImage")
            .field("filename", &self.filename)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Everything needed to render one simple-mode thumbnail.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailRequest {
    pub title: String,
    pub subtitle: String,
    pub title_size: u32,
    pub subtitle_size: u32,
    pub bg_color: Rgb8,
    pub text_color: Rgb8,
    pub shadow_color: Rgb8,
    #[serde(with = "text_styles_serde")]
    pub text_styles: TextStyle,
    pub shadow_enabled: bool,
    pub shadow_offset: ShadowOffset,
    pub bg_type: BackgroundKind,
    /// Only consulted when `bg_type` is [`BackgroundKind::Image`].
    #[serde(skip)]
    pub bg_image: Option<BackgroundImage>,
}

impl Default for ThumbnailRequest {
    fn default() -> Self {
        Self {
            title: "Your Title".to_owned(),
            subtitle: "Your Subtitle".to_owned(),
            title_size: 48,
            subtitle_size: 24,
            bg_color: Rgb8::new(255, 0, 0),
            text_color: Rgb8::WHITE,
            shadow_color: Rgb8::BLACK,
            text_styles: TextStyle::default(),
            shadow_enabled: false,
            shadow_offset: ShadowOffset::default(),
            bg_type: BackgroundKind::Color,
            bg_image: None,
        }
    }
}

impl ThumbnailRequest {
    /// Build a request from URL-encoded form fields. Missing fields keep their defaults and
    /// unknown keys are ignored.
    pub fn from_form_fields<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> ThumbResult<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut req = Self::default();
        for (key, value) in fields {
            let value = value.as_ref();
            match key.as_ref() {
                "title" => req.title = value.to_owned(),
                "subtitle" => req.subtitle = value.to_owned(),
                "title_size" => req.title_size = parse_int("title_size", value)?,
                "subtitle_size" => req.subtitle_size = parse_int("subtitle_size", value)?,
                "bg_color" => req.bg_color = parse_color(value)?,
                "text_color" => req.text_color = parse_color(value)?,
                "shadow_color" => req.shadow_color = parse_color(value)?,
                "text_styles" => req.text_styles = TextStyle::parse_list(value),
                "shadow_enabled" => req.shadow_enabled = value == "on",
                "shadow_offset_x" => req.shadow_offset.x = parse_int("shadow_offset_x", value)?,
                "shadow_offset_y" => req.shadow_offset.y = parse_int("shadow_offset_y", value)?,
                "bg_type" => {
                    req.bg_type = if value == "image" {
                        BackgroundKind::Image
                    } else {
                        BackgroundKind::Color
                    }
                }
                _ => {}
            }
        }
        Ok(req)
    }

    /// Seed text and colors from a gallery template.
    ///
    /// `bg_color` takes the first gradient stop and `text_color` the title color. Both lines
    /// render in one text color, so the template's `subtitle_color` is not carried over.
    pub fn from_template(template: &TemplateDescriptor) -> Self {
        let defaults = Self::default();
        Self {
            title: template.title.to_owned(),
            subtitle: template.subtitle.to_owned(),
            bg_color: template
                .gradient_stops()
                .first()
                .copied()
                .unwrap_or(defaults.bg_color),
            text_color: parse_color(template.title_color).unwrap_or(defaults.text_color),
            ..defaults
        }
    }

    pub fn with_background_image(mut self, filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.bg_type = BackgroundKind::Image;
        self.bg_image = Some(BackgroundImage {
            filename: filename.into(),
            bytes,
        });
        self
    }

    /// Check sizes are within `1..=MAX_FONT_SIZE_PX`.
    pub fn validate(&self) -> ThumbResult<()> {
        for (field, size) in [
            ("title_size", self.title_size),
            ("subtitle_size", self.subtitle_size),
        ] {
            if !(1..=MAX_FONT_SIZE_PX).contains(&size) {
                return Err(ThumbError::invalid_input(format!(
                    "{field} must be between 1 and {MAX_FONT_SIZE_PX}, got {size}"
                )));
            }
        }
        Ok(())
    }
}

fn parse_int<T: std::str::FromStr>(field: &str, value: &str) -> ThumbResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ThumbError::invalid_input(format!("{field} must be an integer, got \"{value}\"")))
}

mod text_styles_serde {
    use serde::{Deserialize, Deserializer, Serializer, ser::SerializeSeq};

    use crate::text::font::TextStyle;

    pub(super) fn serialize<S: Serializer>(style: &TextStyle, s: S) -> Result<S::Ok, S::Error> {
        let names = [
            (style.bold, "bold"),
            (style.italic, "italic"),
            (style.underline, "underline"),
        ];
        let mut seq = s.serialize_seq(None)?;
        for (_, name) in names.iter().filter(|(on, _)| *on) {
            seq.serialize_element(name)?;
        }
        seq.end()
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<TextStyle, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            List(String),
            Tokens(Vec<String>),
        }

        Ok(match Repr::deserialize(d)? {
            Repr::List(s) => TextStyle::parse_list(&s),
            Repr::Tokens(v) => TextStyle::from_tokens(v.iter().map(String::as_str)),
        })
    }
}

/// One image plus the filter to run on it.
#[derive(Clone, PartialEq)]
pub struct FilterRequest {
    pub image: Vec<u8>,
    /// Upload name; its extension must be on the whitelist.
    pub filename: String,
    pub kind: FilterKind,
    /// Factor where 1.0 is the identity.
    pub intensity: f32,
}

impl std::fmt::Debug for FilterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterRequest")
            .field("image", &self.image.len())
            .field("filename", &self.filename)
            .field("kind", &self.kind)
            .field("intensity", &self.intensity)
            .finish()
    }
}

impl FilterRequest {
    pub fn new(image: Vec<u8>, filename: impl Into<String>, kind: FilterKind, intensity: f32) -> Self {
        Self {
            image,
            filename: filename.into(),
            kind,
            intensity,
        }
    }

    /// Intensity given on the form's percent scale, where 100 is the identity.
    pub fn from_percent(
        image: Vec<u8>,
        filename: impl Into<String>,
        kind: FilterKind,
        percent: f32,
    ) -> Self {
        Self::new(image, filename, kind, percent / 100.0)
    }
}

#[cfg(test)]
#[path = "../tests/unit/request.rs"]
mod tests;
