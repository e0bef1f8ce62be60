use std::path::{Path, PathBuf};
use std::sync::Arc;

use usvg::fontdb;

use crate::foundation::opts::FontOpts;
use crate::text::font::{BuiltinFont, FaceData, Font, FontVariant};

/// A source of renderable fonts, tried in order by [`FontResolver`].
pub trait FontProvider: std::fmt::Debug + Send + Sync {
    /// Short human-readable name used in logs.
    fn name(&self) -> &str;

    /// Produce a font at `size_px`, or `None` when this provider has nothing to offer.
    fn resolve(&self, size_px: u32) -> Option<Font>;
}

/// Outline face loaded from a named file in one of the configured font directories.
#[derive(Debug)]
pub struct FileFaceProvider {
    name: String,
    face: Option<Arc<FaceData>>,
}

impl FileFaceProvider {
    /// Look up `variant`'s preferred file in `dirs`. A missing or unparseable file leaves the
    /// provider empty.
    pub fn load(dirs: &[PathBuf], variant: FontVariant) -> Self {
        let file = variant.preferred_file();
        let face = dirs
            .iter()
            .find_map(|dir| find_file_ci(dir, file))
            .and_then(|path| load_face_file(&path, variant));
        Self {
            name: format!("file:{file}"),
            face,
        }
    }
}

impl FontProvider for FileFaceProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn resolve(&self, size_px: u32) -> Option<Font> {
        outline_at(self.face.as_ref(), size_px)
    }
}

/// Outline face picked from the system font database.
#[derive(Debug)]
pub struct SystemFaceProvider {
    name: String,
    face: Option<Arc<FaceData>>,
}

/// Sans families tried in order when picking a system face.
pub const SANS_FAMILIES: [&str; 5] = [
    "Arial",
    "Liberation Sans",
    "Helvetica",
    "DejaVu Sans",
    "Noto Sans",
];

impl SystemFaceProvider {
    /// Best match for the first installed family of [`SANS_FAMILIES`] (then the database's
    /// generic sans-serif) with `variant`'s weight and style.
    pub fn load(db: &fontdb::Database, variant: FontVariant) -> Self {
        let installed = installed_sans_family(db);
        let mut families = Vec::with_capacity(2);
        if let Some(name) = installed {
            families.push(fontdb::Family::Name(name));
        }
        families.push(fontdb::Family::SansSerif);

        let query = fontdb::Query {
            families: &families,
            weight: if variant.is_bold() {
                fontdb::Weight::BOLD
            } else {
                fontdb::Weight::NORMAL
            },
            stretch: fontdb::Stretch::Normal,
            style: if variant.is_italic() {
                fontdb::Style::Italic
            } else {
                fontdb::Style::Normal
            },
        };

        let face = db.query(&query).and_then(|id| {
            let label = db
                .face(id)
                .map(|info| format!("system:{}", info.post_script_name))
                .unwrap_or_else(|| format!("system:{id:?}"));
            db.with_face_data(id, |data, index| {
                Arc::new(FaceData::new(label, variant, data.to_vec(), index))
            })
        });
        if face.is_none() {
            tracing::debug!(?variant, family = ?installed, "no matching system face");
        }

        Self {
            name: format!("system:{variant:?}"),
            face,
        }
    }
}

fn installed_sans_family(db: &fontdb::Database) -> Option<&'static str> {
    SANS_FAMILIES.into_iter().find(|wanted| {
        db.faces().any(|face| {
            face.families
                .iter()
                .any(|(name, _)| name.eq_ignore_ascii_case(wanted))
        })
    })
}

impl FontProvider for SystemFaceProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn resolve(&self, size_px: u32) -> Option<Font> {
        outline_at(self.face.as_ref(), size_px)
    }
}

/// The built-in block font; always resolves, reporting the requested size.
#[derive(Debug, Default)]
pub struct BuiltinProvider;

impl FontProvider for BuiltinProvider {
    fn name(&self) -> &str {
        "builtin"
    }

    fn resolve(&self, size_px: u32) -> Option<Font> {
        Some(Font::Builtin(BuiltinFont::with_size(size_px)))
    }
}

fn outline_at(face: Option<&Arc<FaceData>>, size_px: u32) -> Option<Font> {
    if size_px == 0 {
        return None;
    }
    face.map(|face| Font::Outline {
        face: Arc::clone(face),
        size_px,
    })
}

fn find_file_ci(dir: &Path, file: &str) -> Option<PathBuf> {
    let rd = std::fs::read_dir(dir).ok()?;
    rd.flatten()
        .map(|entry| entry.path())
        .find(|path| {
            path.is_file()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.eq_ignore_ascii_case(file))
        })
}

fn load_face_file(path: &Path, variant: FontVariant) -> Option<Arc<FaceData>> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read font file");
            return None;
        }
    };

    // Only keep files fontdb can actually parse a face from.
    let mut db = fontdb::Database::new();
    db.load_font_data(bytes.clone());
    let Some(index) = db.faces().next().map(|f| f.index) else {
        tracing::warn!(path = %path.display(), "font file contains no usable face");
        return None;
    };

    Some(Arc::new(FaceData::new(
        path.display().to_string(),
        variant,
        bytes,
        index,
    )))
}

/// Maps a `(size, bold, italic)` request to a concrete font through per-variant provider chains.
///
/// Built once per process and shared read-only between requests.
#[derive(Debug)]
pub struct FontResolver {
    chains: [Vec<Box<dyn FontProvider>>; 4],
}

impl FontResolver {
    /// Preferred font files, then (optionally) system fonts, then the built-in font.
    pub fn new(opts: &FontOpts) -> Self {
        let system_db = opts.system_fonts.then(|| {
            let mut db = fontdb::Database::new();
            db.load_system_fonts();
            tracing::debug!(faces = db.len(), "loaded system font database");
            db
        });

        Self::from_chains(|variant| {
            let mut chain: Vec<Box<dyn FontProvider>> = Vec::with_capacity(3);
            chain.push(Box::new(FileFaceProvider::load(&opts.font_dirs, variant)));
            if let Some(db) = &system_db {
                chain.push(Box::new(SystemFaceProvider::load(db, variant)));
            }
            chain.push(Box::new(BuiltinProvider));
            chain
        })
    }

    /// Resolver that only knows the built-in font. Output does not depend on installed fonts.
    pub fn builtin_only() -> Self {
        Self::from_chains(|_| vec![Box::new(BuiltinProvider) as Box<dyn FontProvider>])
    }

    /// Build a resolver from an explicit provider chain per variant.
    pub fn from_chains(
        mut chain_for: impl FnMut(FontVariant) -> Vec<Box<dyn FontProvider>>,
    ) -> Self {
        Self {
            chains: FontVariant::ALL.map(&mut chain_for),
        }
    }

    /// Resolve a font; never fails.
    ///
    /// Falls back along the variant's chain, logging a warning when the preferred provider is
    /// unavailable. With every provider exhausted the built-in font is returned at its native
    /// size.
    pub fn resolve(&self, size_px: u32, bold: bool, italic: bool) -> Font {
        let variant = FontVariant::from_emphasis(bold, italic);
        let chain = &self.chains[variant.index()];

        for (i, provider) in chain.iter().enumerate() {
            let Some(font) = provider.resolve(size_px) else {
                continue;
            };
            if i > 0 {
                tracing::warn!(
                    ?variant,
                    size_px,
                    preferred = chain[0].name(),
                    using = provider.name(),
                    "preferred font unavailable, falling back"
                );
            }
            return font;
        }

        tracing::warn!(
            ?variant,
            size_px,
            "no font provider resolved; using built-in font at native size"
        );
        Font::Builtin(BuiltinFont::native())
    }

    /// Names of the providers tried for `variant`, in order.
    pub fn provider_names(&self, variant: FontVariant) -> Vec<&str> {
        self.chains[variant.index()]
            .iter()
            .map(|p| p.name())
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/provider.rs"]
mod tests;
