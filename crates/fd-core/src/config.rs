//! Application configuration types.
//!
//! The top-level [`Config`] struct is deserialized from JSON and carries the
//! server, storage, tool, upload-limit and job-default sections. Every
//! section defaults sensibly so a completely empty `{}` file is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;
use crate::layout::WorkDirs;
use crate::Error;

const GIB: u64 = 1 << 30;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub tools: ToolsConfig,
    pub limits: UploadLimits,
    pub defaults: JobDefaults,
}

impl Config {
    /// Deserialize a `Config` from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| Error::Validation(format!("config parse error: {e}")))
    }

    /// Load configuration from a file path, falling back to defaults if the
    /// path is `None`, the file does not exist, or it fails to parse.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file {}: {e}", path.display());
                Self::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read config file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Resolved work directories for this configuration.
    pub fn work_dirs(&self) -> WorkDirs {
        WorkDirs::new(&self.storage.work_root)
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.server.port == 0 {
            warnings.push("server.port is 0; a random port will be assigned".into());
        }

        if self.tools.timeout_secs == 0 {
            warnings.push("tools.timeout_secs is 0; every tool call will time out".into());
        }

        for (name, value) in [
            ("limits.max_video_upload_bytes", self.limits.max_video_upload_bytes),
            ("limits.max_image_upload_bytes", self.limits.max_image_upload_bytes),
            ("limits.max_audio_upload_bytes", self.limits.max_audio_upload_bytes),
        ] {
            if value == 0 {
                warnings.push(format!("{name} is 0; every upload will be rejected"));
            }
        }

        if !(self.defaults.fps.is_finite() && self.defaults.fps > 0.0) {
            warnings.push(format!(
                "defaults.fps {} is not positive; falling back to 1.0",
                self.defaults.fps
            ));
        }

        if self
            .defaults
            .audio_format
            .parse::<crate::AudioFormat>()
            .is_err()
        {
            warnings.push(format!(
                "defaults.audio_format '{}' is not a supported format",
                self.defaults.audio_format
            ));
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Optional directory served for any path no route claims (a UI build).
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5060,
            static_dir: None,
        }
    }
}

/// Where uploads and generated files live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub work_root: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            work_root: PathBuf::from("./work"),
        }
    }
}

/// Paths to external CLI tools and their deadline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub ffmpeg_path: Option<PathBuf>,
    pub ffprobe_path: Option<PathBuf>,
    /// ImageMagick front-end; `magick` or the legacy `convert`.
    pub magick_path: Option<PathBuf>,
    #[serde(default = "default_tool_timeout")]
    pub timeout_secs: u64,
}

fn default_tool_timeout() -> u64 {
    3600
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: None,
            ffprobe_path: None,
            magick_path: None,
            timeout_secs: default_tool_timeout(),
        }
    }
}

impl ToolsConfig {
    /// Per-invocation deadline.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Request body caps for the three upload endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadLimits {
    pub max_video_upload_bytes: u64,
    pub max_image_upload_bytes: u64,
    pub max_audio_upload_bytes: u64,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_video_upload_bytes: 20 * GIB,
            max_image_upload_bytes: 5 * GIB,
            max_audio_upload_bytes: 5 * GIB,
        }
    }
}

/// Values applied to job parameters the client left unset or zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JobDefaults {
    pub fps: f64,
    pub jpeg_quality: u32,
    pub pdf_density: u32,
    pub pdf_quality: u32,
    pub audio_format: String,
}

impl Default for JobDefaults {
    fn default() -> Self {
        Self {
            fps: 1.0,
            jpeg_quality: 2,
            pdf_density: 150,
            pdf_quality: 92,
            audio_format: "mp3".into(),
        }
    }
}

impl JobDefaults {
    /// Frame rate applied when the client sends none. A configured value that
    /// is not a positive finite number falls back to 1.0.
    pub fn frame_rate(&self) -> f64 {
        if self.fps.is_finite() && self.fps > 0.0 {
            self.fps
        } else {
            1.0
        }
    }
}
