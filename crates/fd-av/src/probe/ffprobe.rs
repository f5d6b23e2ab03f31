//! FFprobe-backed inspection.
//!
//! Two modes: a cheap duration-only query printed as a bare number, and a
//! full `-print_format json -show_format -show_streams` probe mapped into
//! [`AudioProbe`].

use std::path::Path;

use fd_core::AudioProbe;
use serde::Deserialize;

use crate::command::ToolCommand;
use crate::tools::ToolRegistry;

/// Container duration in seconds.
pub async fn probe_duration(tools: &ToolRegistry, path: &Path) -> fd_core::Result<f64> {
    let ffprobe = tools.require("ffprobe")?;

    let mut cmd = ToolCommand::for_tool(ffprobe);
    cmd.args([
        "-v", "error",
        "-show_entries", "format=duration",
        "-of", "default=nw=1:nk=1",
    ]);
    cmd.arg(path.to_string_lossy().as_ref());

    let output = cmd.execute().await?;
    parse_duration(&output.stdout)
}

/// Full probe of an audio file; the raw JSON is kept on the result.
pub async fn probe_audio(tools: &ToolRegistry, path: &Path) -> fd_core::Result<AudioProbe> {
    let ffprobe = tools.require("ffprobe")?;

    let mut cmd = ToolCommand::for_tool(ffprobe);
    cmd.args([
        "-v", "error",
        "-print_format", "json",
        "-show_format",
        "-show_streams",
    ]);
    cmd.arg(path.to_string_lossy().as_ref());

    let output = cmd.execute().await?;
    Ok(parse_audio_probe(&output.stdout))
}

/// Parse the duration-only output (`12.345000`, or `N/A` when unknown).
pub fn parse_duration(stdout: &str) -> fd_core::Result<f64> {
    let s = stdout.trim();
    if s.is_empty() || s == "N/A" {
        return Err(fd_core::Error::Probe("no duration".into()));
    }
    s.parse::<f64>()
        .map_err(|e| fd_core::Error::Probe(format!("bad duration {s:?}: {e}")))
}

// ---------------------------------------------------------------------------
// JSON structures
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    format: FfprobeFormat,
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
    bit_rate: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: Option<String>,
    codec_name: Option<String>,
    channels: Option<u32>,
    sample_rate: Option<String>,
    bit_rate: Option<String>,
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

/// Map full-probe JSON onto an [`AudioProbe`].
///
/// Best effort: unparseable JSON or missing fields leave zero/empty values,
/// and the raw text is always retained.
pub fn parse_audio_probe(raw: &str) -> AudioProbe {
    let parsed: FfprobeOutput = serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::debug!("ffprobe JSON parse error: {e}");
        FfprobeOutput::default()
    });

    let mut probe = AudioProbe {
        raw_json: raw.to_string(),
        ..AudioProbe::default()
    };

    if let Some(d) = parse_positive_f64(parsed.format.duration.as_deref()) {
        probe.duration_seconds = d;
    }
    if let Some(bps) = parse_positive_u64(parsed.format.bit_rate.as_deref()) {
        probe.bitrate_kbps = kbps(bps);
    }

    // Stream-level values win over container-level ones.
    if let Some(stream) = parsed
        .streams
        .into_iter()
        .find(|s| s.codec_type.as_deref() == Some("audio"))
    {
        probe.codec = stream.codec_name.unwrap_or_default();
        if let Some(ch) = stream.channels.filter(|c| *c > 0) {
            probe.channels = ch;
        }
        if let Some(sr) = parse_positive_u64(stream.sample_rate.as_deref()) {
            probe.sample_rate = u32::try_from(sr).unwrap_or(u32::MAX);
        }
        if let Some(bps) = parse_positive_u64(stream.bit_rate.as_deref()) {
            probe.bitrate_kbps = kbps(bps);
        }
    }

    probe
}

fn parse_positive_f64(s: Option<&str>) -> Option<f64> {
    s?.trim().parse::<f64>().ok().filter(|v| *v > 0.0)
}

fn parse_positive_u64(s: Option<&str>) -> Option<u64> {
    s?.trim().parse::<u64>().ok().filter(|v| *v > 0)
}

fn kbps(bits_per_second: u64) -> u32 {
    u32::try_from(bits_per_second / 1000).unwrap_or(u32::MAX)
}
