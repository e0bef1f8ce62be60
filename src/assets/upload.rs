use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Context;

use crate::foundation::error::{ThumbError, ThumbResult};

static SCRATCH_SEQ: AtomicU64 = AtomicU64::new(0);

/// Upload file extensions accepted for background and filter images.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Whether `filename` carries a whitelisted image extension.
pub fn allowed_file(filename: &str) -> bool {
    upload_extension(filename).is_some()
}

/// Lowercased whitelisted extension of `filename`, if any.
pub fn upload_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    ALLOWED_EXTENSIONS
        .contains(&ext.as_str())
        .then_some(ext)
}

/// Write-once archive of accepted uploads.
///
/// Files are named after a hash of their content, so concurrent requests either write distinct
/// paths or the same bytes to the same path. A stored file is always complete.
#[derive(Clone, Debug)]
pub struct UploadDir {
    root: PathBuf,
}

impl UploadDir {
    /// Create the directory (and parents) if missing.
    pub fn create(root: impl Into<PathBuf>) -> ThumbResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .with_context(|| format!("create upload dir '{}'", root.display()))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store `bytes` under a content-hash name keeping the upload's extension.
    pub fn store(&self, upload_name: &str, bytes: &[u8]) -> ThumbResult<PathBuf> {
        let ext = upload_extension(upload_name).ok_or_else(|| {
            ThumbError::invalid_input(format!(
                "file '{upload_name}' must have one of the extensions {ALLOWED_EXTENSIONS:?}"
            ))
        })?;

        let digest = xxhash_rust::xxh3::xxh3_64(bytes);
        let path = self.root.join(format!("{digest:016x}.{ext}"));

        if path.is_file() {
            tracing::debug!(path = %path.display(), "upload already stored");
            return Ok(path);
        }
        self.write_new(&path, |f| f.write_all(bytes))?;
        tracing::debug!(path = %path.display(), len = bytes.len(), "stored upload");
        Ok(path)
    }

    /// Fill a scratch file next to `path` and rename it into place, so `path` only ever holds
    /// complete content. The scratch file is removed when `fill` fails.
    fn write_new(
        &self,
        path: &Path,
        fill: impl FnOnce(&mut std::fs::File) -> std::io::Result<()>,
    ) -> ThumbResult<()> {
        let seq = SCRATCH_SEQ.fetch_add(1, Ordering::Relaxed);
        let scratch = self
            .root
            .join(format!(".upload-{}-{seq}.part", std::process::id()));

        let written = std::fs::File::create(&scratch)
            .and_then(|mut f| fill(&mut f).and_then(|()| f.sync_all()))
            .and_then(|()| std::fs::rename(&scratch, path));
        if let Err(e) = written {
            let _ = std::fs::remove_file(&scratch);
            return Err(anyhow::Error::new(e)
                .context(format!("write upload '{}'", path.display()))
                .into());
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/upload.rs"]
mod tests;
