//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`], which builds an [`AppContext`] over a temporary
//! work root with a [`RecordingToolkit`] standing in for ffmpeg, ffprobe
//! and ImageMagick. [`TestHarness::with_server`] starts Axum on a random
//! port for HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use fd_av::{AudioTranscode, MediaToolkit, ToolRegistry};
use fd_core::config::Config;
use fd_core::{AudioProbe, Error};
use fd_server::context::AppContext;
use fd_server::router::build_router;

/// One call made against the toolkit.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    Inspect(PathBuf),
    InspectFull(PathBuf),
    ExtractFrames { input: PathBuf, fps: f64, jpeg_quality: u32 },
    AssemblePdf { images: Vec<PathBuf>, output: PathBuf, density: u32, quality: u32 },
    TranscodeAudio { input: PathBuf, output: PathBuf, opts: AudioTranscode },
}

/// Toolkit that records every call and writes placeholder outputs.
#[derive(Debug, Clone)]
pub struct RecordingToolkit {
    calls: Arc<Mutex<Vec<ToolCall>>>,
    /// Duration reported by `inspect` / `inspect_full`.
    pub duration: f64,
    /// Number of frames `extract_frames` writes.
    pub frames: usize,
}

impl Default for RecordingToolkit {
    fn default() -> Self {
        Self {
            calls: Arc::default(),
            duration: 10.0,
            frames: 5,
        }
    }
}

impl RecordingToolkit {
    pub fn calls(&self) -> Vec<ToolCall> {
        self.calls.lock().clone()
    }

    fn record(&self, call: ToolCall) {
        self.calls.lock().push(call);
    }
}

#[async_trait]
impl MediaToolkit for RecordingToolkit {
    async fn inspect(&self, path: &Path) -> fd_core::Result<f64> {
        self.record(ToolCall::Inspect(path.to_path_buf()));
        Ok(self.duration)
    }

    async fn inspect_full(&self, path: &Path) -> fd_core::Result<AudioProbe> {
        self.record(ToolCall::InspectFull(path.to_path_buf()));
        Ok(AudioProbe {
            duration_seconds: self.duration,
            codec: "mp3".into(),
            channels: 2,
            sample_rate: 44100,
            bitrate_kbps: 128,
            raw_json: r#"{"format":{"duration":"10.0"}}"#.into(),
        })
    }

    async fn extract_frames(
        &self,
        input: &Path,
        out_dir: &Path,
        fps: f64,
        jpeg_quality: u32,
    ) -> fd_core::Result<Vec<PathBuf>> {
        self.record(ToolCall::ExtractFrames {
            input: input.to_path_buf(),
            fps,
            jpeg_quality,
        });
        (1..=self.frames)
            .map(|n| {
                let path = out_dir.join(format!("frame_{n:05}.jpg"));
                std::fs::write(&path, b"jpg")?;
                Ok(path)
            })
            .collect()
    }

    async fn assemble_pdf(
        &self,
        images: &[PathBuf],
        output: &Path,
        density: u32,
        quality: u32,
    ) -> fd_core::Result<PathBuf> {
        self.record(ToolCall::AssemblePdf {
            images: images.to_vec(),
            output: output.to_path_buf(),
            density,
            quality,
        });
        if images.is_empty() {
            return Err(Error::tool("magick", "no images"));
        }
        std::fs::write(output, b"%PDF-1.4 test")?;
        Ok(output.to_path_buf())
    }

    async fn transcode_audio(
        &self,
        input: &Path,
        output: &Path,
        opts: &AudioTranscode,
    ) -> fd_core::Result<PathBuf> {
        self.record(ToolCall::TranscodeAudio {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            opts: *opts,
        });
        std::fs::write(output, b"converted")?;
        Ok(output.to_path_buf())
    }
}

/// Test harness wrapping a fully-constructed [`AppContext`] backed by a
/// temporary work root.
pub struct TestHarness {
    pub ctx: AppContext,
    pub toolkit: RecordingToolkit,
    _work: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new harness with default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a new harness with a custom configuration. The work root is
    /// always replaced by a fresh temporary directory.
    pub fn with_config(mut config: Config) -> Self {
        let work = tempfile::tempdir().expect("failed to create temp dir");
        config.storage.work_root = work.path().to_path_buf();

        let toolkit = RecordingToolkit::default();
        let ctx = AppContext::new(
            config,
            Arc::new(ToolRegistry::default()),
            Arc::new(toolkit.clone()),
        );
        ctx.dirs.create_all().expect("failed to create work dirs");

        Self {
            ctx,
            toolkit,
            _work: work,
        }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        Self::with_server_config(Config::default()).await
    }

    /// Start an Axum server with custom config on a random port.
    pub async fn with_server_config(config: Config) -> (Self, SocketAddr) {
        let harness = Self::with_config(config);
        let app = build_router(harness.ctx.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }
}

/// Multipart form with one part per `(file_name, bytes)` under `field`.
pub fn upload_form(field: &str, files: &[(&str, &[u8])]) -> reqwest::multipart::Form {
    files.iter().fold(reqwest::multipart::Form::new(), |form, (name, bytes)| {
        form.part(
            field.to_string(),
            reqwest::multipart::Part::bytes(bytes.to_vec()).file_name(name.to_string()),
        )
    })
}

/// POST a multipart upload and return the JSON body, asserting 200.
pub async fn upload(
    addr: SocketAddr,
    path: &str,
    field: &str,
    files: &[(&str, &[u8])],
) -> serde_json::Value {
    let resp = reqwest::Client::new()
        .post(format!("http://{addr}{path}"))
        .multipart(upload_form(field, files))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200, "upload to {path} failed");
    resp.json().await.unwrap()
}

/// POST a JSON body and return the status and JSON response.
pub async fn post_json(
    addr: SocketAddr,
    path: &str,
    body: serde_json::Value,
) -> (reqwest::StatusCode, serde_json::Value) {
    let resp = reqwest::Client::new()
        .post(format!("http://{addr}{path}"))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = resp.status();
    (status, resp.json().await.unwrap())
}
