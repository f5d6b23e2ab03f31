//! On-disk work layout and the mapping from produced files to download URLs.
//!
//! ```text
//! <work_root>/uploads/<id>/<name>          -> /uploads/<id>/<name>
//! <work_root>/frames/<id>/frame_NNNNN.jpg  (not served)
//! <work_root>/pdfs/<name>.pdf              -> /download/<name>.pdf
//! <work_root>/audio/<name>.<ext>           -> /audio/<name>.<ext>
//! ```

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::ids::AssetId;

/// URL prefix for generated PDFs.
pub const DOWNLOAD_PREFIX: &str = "/download";
/// URL prefix for original uploads.
pub const UPLOADS_PREFIX: &str = "/uploads";
/// URL prefix for converted audio.
pub const AUDIO_PREFIX: &str = "/audio";

/// Resolved work directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkDirs {
    pub root: PathBuf,
    pub uploads: PathBuf,
    pub frames: PathBuf,
    pub pdfs: PathBuf,
    pub audio: PathBuf,
}

impl WorkDirs {
    /// Derive the four sub-directories from a work root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            uploads: root.join("uploads"),
            frames: root.join("frames"),
            pdfs: root.join("pdfs"),
            audio: root.join("audio"),
            root,
        }
    }

    /// Create every directory (idempotent).
    pub fn create_all(&self) -> Result<()> {
        for dir in [&self.uploads, &self.frames, &self.pdfs, &self.audio] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    /// `<id>/<name>`, the upload path relative to the uploads directory.
    pub fn upload_rel_path(id: &AssetId, name: &str) -> String {
        format!("{id}/{name}")
    }

    /// Absolute storage path of an upload.
    pub fn upload_path(&self, id: &AssetId, name: &str) -> PathBuf {
        self.uploads.join(id.as_str()).join(name)
    }

    /// Per-asset frame directory.
    pub fn frame_dir(&self, id: &AssetId) -> PathBuf {
        self.frames.join(id.as_str())
    }

    /// Location of a generated PDF with the given file name.
    pub fn pdf_path(&self, file_name: &str) -> PathBuf {
        self.pdfs.join(file_name)
    }

    /// Location of a converted audio file with the given file name.
    pub fn audio_path(&self, file_name: &str) -> PathBuf {
        self.audio.join(file_name)
    }

    /// Public URL of an original upload.
    pub fn upload_url(rel_path: &str) -> String {
        format!("{UPLOADS_PREFIX}/{rel_path}")
    }

    /// Public URL of a generated PDF.
    pub fn pdf_url(path: &Path) -> String {
        format!("{DOWNLOAD_PREFIX}/{}", file_name_of(path))
    }

    /// Public URL of a converted audio file.
    pub fn audio_url(path: &Path) -> String {
        format!("{AUDIO_PREFIX}/{}", file_name_of(path))
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
