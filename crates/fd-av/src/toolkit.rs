//! The external tool seam used by ingestion and the job coordinators.
//!
//! Every method is one external process invocation (or none, for the
//! listing half of frame extraction). Nothing here retries.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use fd_core::AudioProbe;

use crate::actions::{self, AudioTranscode};
use crate::probe;
use crate::tools::ToolRegistry;

/// Media inspection, frame extraction, PDF assembly and audio transcoding.
#[async_trait]
pub trait MediaToolkit: Send + Sync {
    /// Container duration in seconds.
    async fn inspect(&self, path: &Path) -> fd_core::Result<f64>;

    /// Full structured probe of an audio file.
    async fn inspect_full(&self, path: &Path) -> fd_core::Result<AudioProbe>;

    /// Extract frames into `out_dir`, returning them in temporal order.
    async fn extract_frames(
        &self,
        input: &Path,
        out_dir: &Path,
        fps: f64,
        jpeg_quality: u32,
    ) -> fd_core::Result<Vec<PathBuf>>;

    /// Write `images`, in the given order, as the pages of `output`.
    async fn assemble_pdf(
        &self,
        images: &[PathBuf],
        output: &Path,
        density: u32,
        quality: u32,
    ) -> fd_core::Result<PathBuf>;

    /// Convert `input` into `output` with the given settings.
    async fn transcode_audio(
        &self,
        input: &Path,
        output: &Path,
        opts: &AudioTranscode,
    ) -> fd_core::Result<PathBuf>;
}

/// [`MediaToolkit`] backed by ffmpeg, ffprobe and ImageMagick.
#[derive(Debug, Clone)]
pub struct FfmpegToolkit {
    tools: Arc<ToolRegistry>,
}

impl FfmpegToolkit {
    pub fn new(tools: Arc<ToolRegistry>) -> Self {
        Self { tools }
    }
}

#[async_trait]
impl MediaToolkit for FfmpegToolkit {
    async fn inspect(&self, path: &Path) -> fd_core::Result<f64> {
        probe::probe_duration(&self.tools, path).await
    }

    async fn inspect_full(&self, path: &Path) -> fd_core::Result<AudioProbe> {
        probe::probe_audio(&self.tools, path).await
    }

    async fn extract_frames(
        &self,
        input: &Path,
        out_dir: &Path,
        fps: f64,
        jpeg_quality: u32,
    ) -> fd_core::Result<Vec<PathBuf>> {
        actions::extract_frames(&self.tools, input, out_dir, fps, jpeg_quality).await
    }

    async fn assemble_pdf(
        &self,
        images: &[PathBuf],
        output: &Path,
        density: u32,
        quality: u32,
    ) -> fd_core::Result<PathBuf> {
        actions::assemble_pdf(&self.tools, images, output, density, quality).await
    }

    async fn transcode_audio(
        &self,
        input: &Path,
        output: &Path,
        opts: &AudioTranscode,
    ) -> fd_core::Result<PathBuf> {
        actions::transcode_audio(&self.tools, input, output, opts).await
    }
}
