//! Media inspection via ffprobe.

mod ffprobe;

pub use ffprobe::{parse_audio_probe, parse_duration, probe_audio, probe_duration};
