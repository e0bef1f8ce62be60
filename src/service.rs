use std::sync::Arc;

use crate::assets::decode::{decode_rgb, encode_rgb_png};
use crate::assets::templates::{TemplateDescriptor, template_catalog};
use crate::assets::upload::{UploadDir, allowed_file};
use crate::effects::filter;
use crate::foundation::error::{ThumbError, ThumbResult};
use crate::foundation::opts::ThumbforgeOpts;
use crate::render::compose::Compositor;
use crate::render::ingest::{IngestedCanvas, ingest_data_url};
use crate::request::{BackgroundKind, FilterRequest, ThumbnailRequest};
use crate::text::provider::FontResolver;

/// The three image operations offered to a front end, plus the template gallery.
///
/// Built once at startup. Holds only read-only state, so a shared reference can serve any
/// number of requests; each call allocates its own canvas and shaper.
#[derive(Debug)]
pub struct Thumbnailer {
    opts: ThumbforgeOpts,
    compositor: Compositor,
    uploads: Option<UploadDir>,
}

impl Thumbnailer {
    /// Load fonts and create the upload directory described by `opts`.
    pub fn new(opts: ThumbforgeOpts) -> ThumbResult<Self> {
        let fonts = Arc::new(FontResolver::new(&opts.fonts));
        Self::with_fonts(opts, fonts)
    }

    /// Like [`Thumbnailer::new`] with an already built font resolver.
    pub fn with_fonts(opts: ThumbforgeOpts, fonts: Arc<FontResolver>) -> ThumbResult<Self> {
        let uploads = opts
            .upload_dir
            .as_ref()
            .map(|dir| UploadDir::create(dir.clone()))
            .transpose()?;
        let compositor = Compositor::new(fonts, opts.limits);
        Ok(Self {
            opts,
            compositor,
            uploads,
        })
    }

    pub fn opts(&self) -> &ThumbforgeOpts {
        &self.opts
    }

    /// Render a simple-mode thumbnail as PNG.
    #[tracing::instrument(skip(self, req), fields(title_size = req.title_size, subtitle_size = req.subtitle_size))]
    pub fn render_simple_thumbnail(&self, req: &ThumbnailRequest) -> ThumbResult<Vec<u8>> {
        log_failure("simple thumbnail", self.simple(req))
    }

    /// Normalize a client-rendered canvas export to the canonical size.
    #[tracing::instrument(skip(self, data_url), fields(len = data_url.len()))]
    pub fn render_advanced_thumbnail(&self, data_url: &str) -> ThumbResult<IngestedCanvas> {
        log_failure(
            "advanced thumbnail",
            ingest_data_url(data_url, &self.opts.limits),
        )
    }

    /// Run one filter over an uploaded image and return the PNG result.
    #[tracing::instrument(skip(self, req), fields(kind = %req.kind, intensity = req.intensity))]
    pub fn apply_filter(&self, req: &FilterRequest) -> ThumbResult<Vec<u8>> {
        log_failure("filter", self.run_filter(req))
    }

    /// The static template gallery.
    pub fn templates(&self) -> &'static [TemplateDescriptor] {
        template_catalog()
    }

    fn simple(&self, req: &ThumbnailRequest) -> ThumbResult<Vec<u8>> {
        req.validate()?;
        self.archive_background(req);
        let img = self.compositor.compose(req)?;
        encode_rgb_png(&img)
    }

    fn run_filter(&self, req: &FilterRequest) -> ThumbResult<Vec<u8>> {
        if !allowed_file(&req.filename) {
            return Err(ThumbError::invalid_input(format!(
                "invalid image: '{}' is not a png or jpeg upload",
                req.filename
            )));
        }
        self.archive(&req.filename, &req.image);
        let img = decode_rgb(&req.image, &self.opts.limits)?;
        let filtered = filter::apply_filter(&img, req.kind, req.intensity)?;
        encode_rgb_png(&filtered)
    }

    fn archive_background(&self, req: &ThumbnailRequest) {
        if req.bg_type != BackgroundKind::Image {
            return;
        }
        if let Some(upload) = req.bg_image.as_ref().filter(|u| allowed_file(&u.filename)) {
            self.archive(&upload.filename, &upload.bytes);
        }
    }

    // Best effort.
    fn archive(&self, filename: &str, bytes: &[u8]) {
        let Some(uploads) = &self.uploads else {
            return;
        };
        if let Err(e) = uploads.store(filename, bytes) {
            tracing::warn!(filename, error = %e, "failed to archive upload");
        }
    }
}

fn log_failure<T>(op: &str, out: ThumbResult<T>) -> ThumbResult<T> {
    if let Err(e) = &out {
        if e.is_client_error() {
            tracing::error!(op, error = %e, "rejected request");
        } else {
            tracing::error!(op, error = ?e, "request failed");
        }
    }
    out
}

#[cfg(test)]
#[path = "../tests/unit/service.rs"]
mod tests;
