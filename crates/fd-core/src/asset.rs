//! Asset records produced by ingestion.
//!
//! Records are immutable once registered. The storage path is kept on the
//! record for the job coordinators but never leaves the process.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::AssetId;

/// An uploaded video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct VideoAsset {
    #[schema(value_type = String)]
    pub id: AssetId,
    /// Sanitized original file name.
    pub name: String,
    /// `<id>/<name>`, relative to the uploads directory.
    pub rel_path: String,
    #[serde(skip)]
    pub path: PathBuf,
    pub size_bytes: u64,
    /// Zero when the inspector could not tell.
    pub duration_seconds: f64,
    pub uploaded_at: DateTime<Utc>,
}

/// An uploaded image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ImageAsset {
    #[schema(value_type = String)]
    pub id: AssetId,
    pub name: String,
    pub rel_path: String,
    #[serde(skip)]
    pub path: PathBuf,
    pub size_bytes: u64,
    pub uploaded_at: DateTime<Utc>,
    /// Public retrieval URL of the original upload.
    pub url: String,
}

/// An uploaded audio file with whatever the inspector could tell about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AudioAsset {
    #[schema(value_type = String)]
    pub id: AssetId,
    pub name: String,
    pub rel_path: String,
    #[serde(skip)]
    pub path: PathBuf,
    pub size_bytes: u64,
    pub uploaded_at: DateTime<Utc>,
    pub duration_seconds: f64,
    pub codec: String,
    pub channels: u32,
    pub sample_rate: u32,
    pub bitrate_kbps: u32,
    /// Raw inspector output, kept verbatim for display.
    pub probe_json: String,
}

/// Structured result of a full inspector run on an audio file.
///
/// Every field defaults to zero/empty so a failed or partial probe still
/// yields a usable record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioProbe {
    pub duration_seconds: f64,
    pub codec: String,
    pub channels: u32,
    pub sample_rate: u32,
    pub bitrate_kbps: u32,
    pub raw_json: String,
}

impl AudioAsset {
    /// Fill the probe-derived fields of a record.
    pub fn with_probe(mut self, probe: AudioProbe) -> Self {
        self.duration_seconds = probe.duration_seconds;
        self.codec = probe.codec;
        self.channels = probe.channels;
        self.sample_rate = probe.sample_rate;
        self.bitrate_kbps = probe.bitrate_kbps;
        self.probe_json = probe.raw_json;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_video() -> VideoAsset {
        VideoAsset {
            id: AssetId::from("0123456789abcdef"),
            name: "clip.mp4".into(),
            rel_path: "0123456789abcdef/clip.mp4".into(),
            path: PathBuf::from("/work/uploads/0123456789abcdef/clip.mp4"),
            size_bytes: 42,
            duration_seconds: 12.5,
            uploaded_at: Utc::now(),
        }
    }

    #[test]
    fn storage_path_is_not_serialized() {
        let json = serde_json::to_value(sample_video()).unwrap();
        assert!(json.get("path").is_none());
        assert_eq!(json["id"], "0123456789abcdef");
        assert_eq!(json["rel_path"], "0123456789abcdef/clip.mp4");
        assert_eq!(json["duration_seconds"], 12.5);
        assert!(json["uploaded_at"].is_string());
    }

    #[test]
    fn audio_with_probe_copies_fields() {
        let audio = AudioAsset {
            id: AssetId::from("aa"),
            name: "a.wav".into(),
            rel_path: "aa/a.wav".into(),
            path: PathBuf::from("/tmp/a.wav"),
            size_bytes: 10,
            uploaded_at: Utc::now(),
            duration_seconds: 0.0,
            codec: String::new(),
            channels: 0,
            sample_rate: 0,
            bitrate_kbps: 0,
            probe_json: String::new(),
        }
        .with_probe(AudioProbe {
            duration_seconds: 3.0,
            codec: "pcm_s16le".into(),
            channels: 2,
            sample_rate: 44100,
            bitrate_kbps: 1411,
            raw_json: "{}".into(),
        });

        assert_eq!(audio.codec, "pcm_s16le");
        assert_eq!(audio.channels, 2);
        assert_eq!(audio.sample_rate, 44100);
        assert_eq!(audio.bitrate_kbps, 1411);
        assert_eq!(audio.probe_json, "{}");
    }
}
