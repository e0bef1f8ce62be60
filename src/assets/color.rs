use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgb8;
use crate::foundation::error::ThumbError;

/// Parse a color value as submitted by the thumbnail form.
///
/// Accepts `#RGB`, `#RRGGBB` (the leading `#` is optional) and `rgb(r, g, b)`.
pub fn parse_color(s: &str) -> Result<Rgb8, ThumbError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ThumbError::invalid_input("color must be non-empty"));
    }

    let lower = s.to_ascii_lowercase();
    if let Some(body) = lower
        .strip_prefix("rgb(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_rgb_fn(body).map_err(|e| ThumbError::invalid_input(format!("{e}: \"{s}\"")));
    }

    parse_hex(&lower).map_err(|e| ThumbError::invalid_input(format!("{e}: \"{s}\"")))
}

fn parse_hex(s: &str) -> Result<Rgb8, String> {
    let s = s.strip_prefix('#').unwrap_or(s);
    if !s.is_ascii() {
        return Err("hex color must be ASCII".to_owned());
    }

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    match s.len() {
        3 => {
            // #abc is shorthand for #aabbcc.
            let mut out = [0u8; 3];
            for (i, ch) in s.chars().enumerate() {
                let nib = hex_byte(&ch.to_string())?;
                out[i] = nib * 17;
            }
            Ok(Rgb8::new(out[0], out[1], out[2]))
        }
        6 => Ok(Rgb8::new(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        _ => Err("hex color must be #RGB or #RRGGBB".to_owned()),
    }
}

fn parse_rgb_fn(body: &str) -> Result<Rgb8, String> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err("rgb() takes exactly three components".to_owned());
    }
    let mut out = [0u8; 3];
    for (slot, part) in out.iter_mut().zip(&parts) {
        *slot = part
            .parse::<u8>()
            .map_err(|_| format!("rgb() component \"{part}\" must be 0..=255"))?;
    }
    Ok(Rgb8::new(out[0], out[1], out[2]))
}

impl FromStr for Rgb8 {
    type Err = ThumbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s)
    }
}

impl std::fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Str(String),
            Arr([u8; 3]),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Str(s) => parse_color(&s).map_err(serde::de::Error::custom),
            Repr::Arr([r, g, b]) => Ok(Rgb8::new(r, g, b)),
        }
    }
}
