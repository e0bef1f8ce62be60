//! Thumbforge renders fixed-size 1280×720 promotional thumbnails.
//!
//! - [`Thumbnailer::render_simple_thumbnail`] lays out a title and subtitle over a color or
//!   image background and encodes the result as PNG
//! - [`Thumbnailer::render_advanced_thumbnail`] normalizes a browser canvas export
//! - [`Thumbnailer::apply_filter`] runs one whole-image filter over an upload
#![forbid(unsafe_code)]

mod assets;
mod effects;
mod foundation;
mod render;
mod request;
mod service;
mod text;

pub use crate::assets::color::parse_color;
pub use crate::assets::decode::{encode_png, encode_rgb_png, probe_dimensions};
pub use crate::assets::templates::{TemplateDescriptor, template_by_id, template_catalog};
pub use crate::assets::upload::{ALLOWED_EXTENSIONS, UploadDir, allowed_file};
pub use crate::effects::filter::{FilterKind, apply_filter};
pub use crate::foundation::core::{Canvas, Rgb8};
pub use crate::foundation::error::{ThumbError, ThumbResult};
pub use crate::foundation::opts::{FontOpts, ImageLimits, ThumbforgeOpts};
pub use crate::render::compose::Compositor;
pub use crate::render::ingest::{IngestedCanvas, ingest_data_url};
pub use crate::request::{
    BackgroundImage, BackgroundKind, FilterRequest, MAX_FONT_SIZE_PX, ShadowOffset,
    ThumbnailRequest,
};
pub use crate::service::Thumbnailer;
pub use crate::text::fit::{FIT_FLOOR_PX, FittedText, RenderedLine, fit_text, layout_line};
pub use crate::text::font::{BuiltinFont, FaceData, Font, FontVariant, TextStyle};
pub use crate::text::provider::{
    BuiltinProvider, FileFaceProvider, FontProvider, FontResolver, SANS_FAMILIES,
    SystemFaceProvider,
};
pub use crate::text::shaper::{ShapedLine, TextShaper};
