//! Recording [`MediaToolkit`] stand-in for unit tests.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use fd_av::{AudioTranscode, MediaToolkit, ToolRegistry};
use fd_core::config::Config;
use fd_core::{AudioProbe, Error};

use crate::context::AppContext;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Inspect(PathBuf),
    InspectFull(PathBuf),
    Extract { input: PathBuf, fps: f64, jpeg_quality: u32 },
    Assemble { images: Vec<PathBuf>, output: PathBuf, density: u32, quality: u32 },
    Transcode { input: PathBuf, output: PathBuf, opts: AudioTranscode },
}

#[derive(Debug, Clone)]
pub struct FakeToolkit {
    calls: Arc<Mutex<Vec<Call>>>,
    duration: f64,
    inspect_fails: bool,
    frames: usize,
    assemble_fails: bool,
}

impl Default for FakeToolkit {
    fn default() -> Self {
        Self {
            calls: Arc::default(),
            duration: 0.0,
            inspect_fails: false,
            frames: 3,
            assemble_fails: false,
        }
    }
}

impl FakeToolkit {
    pub fn with_duration(mut self, secs: f64) -> Self {
        self.duration = secs;
        self
    }

    pub fn with_inspect_failure(mut self) -> Self {
        self.inspect_fails = true;
        self
    }

    pub fn with_frames(mut self, n: usize) -> Self {
        self.frames = n;
        self
    }

    pub fn with_assemble_failure(mut self) -> Self {
        self.assemble_fails = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }
}

#[async_trait]
impl MediaToolkit for FakeToolkit {
    async fn inspect(&self, path: &Path) -> fd_core::Result<f64> {
        self.record(Call::Inspect(path.to_path_buf()));
        if self.inspect_fails {
            return Err(Error::tool("ffprobe", "invalid data"));
        }
        Ok(self.duration)
    }

    async fn inspect_full(&self, path: &Path) -> fd_core::Result<AudioProbe> {
        self.record(Call::InspectFull(path.to_path_buf()));
        if self.inspect_fails {
            return Err(Error::tool("ffprobe", "invalid data"));
        }
        Ok(AudioProbe {
            duration_seconds: self.duration,
            codec: "pcm_s16le".into(),
            channels: 2,
            sample_rate: 44100,
            bitrate_kbps: 1411,
            raw_json: "{}".into(),
        })
    }

    async fn extract_frames(
        &self,
        input: &Path,
        out_dir: &Path,
        fps: f64,
        jpeg_quality: u32,
    ) -> fd_core::Result<Vec<PathBuf>> {
        self.record(Call::Extract {
            input: input.to_path_buf(),
            fps,
            jpeg_quality,
        });
        let mut frames = Vec::new();
        for n in 1..=self.frames {
            let path = out_dir.join(format!("frame_{n:05}.jpg"));
            std::fs::write(&path, b"jpg")?;
            frames.push(path);
        }
        Ok(frames)
    }

    async fn assemble_pdf(
        &self,
        images: &[PathBuf],
        output: &Path,
        density: u32,
        quality: u32,
    ) -> fd_core::Result<PathBuf> {
        self.record(Call::Assemble {
            images: images.to_vec(),
            output: output.to_path_buf(),
            density,
            quality,
        });
        if self.assemble_fails {
            return Err(Error::tool("magick", "no decode delegate"));
        }
        std::fs::write(output, b"%PDF-1.4")?;
        Ok(output.to_path_buf())
    }

    async fn transcode_audio(
        &self,
        input: &Path,
        output: &Path,
        opts: &AudioTranscode,
    ) -> fd_core::Result<PathBuf> {
        self.record(Call::Transcode {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            opts: *opts,
        });
        std::fs::write(output, b"audio")?;
        Ok(output.to_path_buf())
    }
}

/// A context rooted in a fresh temp directory, with its work dirs created.
pub fn test_context(kit: FakeToolkit) -> (tempfile::TempDir, AppContext) {
    test_context_with(Config::default(), kit)
}

/// Like [`test_context`] with a custom config; its work root is replaced.
pub fn test_context_with(mut config: Config, kit: FakeToolkit) -> (tempfile::TempDir, AppContext) {
    let tmp = tempfile::tempdir().unwrap();
    config.storage.work_root = tmp.path().join("work");
    let ctx = AppContext::new(config, Arc::new(ToolRegistry::default()), Arc::new(kit));
    ctx.dirs.create_all().unwrap();
    (tmp, ctx)
}
