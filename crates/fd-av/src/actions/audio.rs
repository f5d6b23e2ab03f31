//! Transcode an audio file with ffmpeg.

use std::path::{Path, PathBuf};

use fd_core::AudioFormat;

use crate::command::ToolCommand;
use crate::tools::ToolRegistry;

/// Target settings for one conversion. `None` leaves the source value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioTranscode {
    pub format: AudioFormat,
    pub bitrate_kbps: Option<u32>,
    pub sample_rate: Option<u32>,
    pub channels: Option<u32>,
}

impl AudioTranscode {
    /// Build settings from raw client values, where zero means "unset".
    ///
    /// Bitrate is dropped for lossless formats and channel counts other than
    /// mono or stereo are ignored.
    pub fn new(format: AudioFormat, bitrate_kbps: u32, sample_rate: u32, channels: u32) -> Self {
        Self {
            format,
            bitrate_kbps: (bitrate_kbps > 0 && format.is_lossy()).then_some(bitrate_kbps),
            sample_rate: (sample_rate > 0).then_some(sample_rate),
            channels: matches!(channels, 1 | 2).then_some(channels),
        }
    }
}

/// ffmpeg arguments for converting `input` into `output`.
pub fn transcode_args(input: &Path, output: &Path, opts: &AudioTranscode) -> Vec<String> {
    let mut args: Vec<String> = ["-hide_banner", "-loglevel", "error", "-y", "-i"]
        .into_iter()
        .map(String::from)
        .collect();
    args.push(input.to_string_lossy().into_owned());
    args.extend(["-vn", "-c:a", opts.format.encoder()].map(String::from));

    if let Some(sr) = opts.sample_rate {
        args.extend(["-ar".to_string(), sr.to_string()]);
    }
    if let Some(ch) = opts.channels {
        args.extend(["-ac".to_string(), ch.to_string()]);
    }
    if let Some(br) = opts.bitrate_kbps.filter(|_| opts.format.is_lossy()) {
        args.extend(["-b:a".to_string(), format!("{br}k")]);
    }

    args.push(output.to_string_lossy().into_owned());
    args
}

/// Convert `input` to `opts.format`, writing `output`.
pub async fn transcode_audio(
    tools: &ToolRegistry,
    input: &Path,
    output: &Path,
    opts: &AudioTranscode,
) -> fd_core::Result<PathBuf> {
    let ffmpeg = tools.require("ffmpeg")?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        encoder = opts.format.encoder(),
        "transcoding audio"
    );

    let mut cmd = ToolCommand::for_tool(ffmpeg);
    cmd.args(transcode_args(input, output, opts));
    cmd.execute().await?;

    Ok(output.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_values_are_unset() {
        let t = AudioTranscode::new(AudioFormat::Mp3, 0, 0, 0);
        assert_eq!(t.bitrate_kbps, None);
        assert_eq!(t.sample_rate, None);
        assert_eq!(t.channels, None);
    }

    #[test]
    fn only_mono_or_stereo_channels_pass() {
        assert_eq!(AudioTranscode::new(AudioFormat::Wav, 0, 0, 1).channels, Some(1));
        assert_eq!(AudioTranscode::new(AudioFormat::Wav, 0, 0, 2).channels, Some(2));
        assert_eq!(AudioTranscode::new(AudioFormat::Wav, 0, 0, 6).channels, None);
    }

    #[test]
    fn bitrate_dropped_for_lossless() {
        assert_eq!(AudioTranscode::new(AudioFormat::Flac, 192, 0, 0).bitrate_kbps, None);
        assert_eq!(AudioTranscode::new(AudioFormat::Wav, 192, 0, 0).bitrate_kbps, None);
        assert_eq!(AudioTranscode::new(AudioFormat::Opus, 96, 0, 0).bitrate_kbps, Some(96));
    }

    #[test]
    fn args_for_full_lossy_conversion() {
        let opts = AudioTranscode::new(AudioFormat::Mp3, 192, 44100, 2);
        let args = transcode_args(Path::new("/in/a.wav"), Path::new("/out/a.mp3"), &opts);
        assert_eq!(
            args,
            vec![
                "-hide_banner", "-loglevel", "error", "-y",
                "-i", "/in/a.wav",
                "-vn", "-c:a", "libmp3lame",
                "-ar", "44100",
                "-ac", "2",
                "-b:a", "192k",
                "/out/a.mp3",
            ]
        );
    }

    #[test]
    fn args_for_wav_never_carry_bitrate() {
        let opts = AudioTranscode {
            format: AudioFormat::Wav,
            bitrate_kbps: Some(320),
            sample_rate: None,
            channels: None,
        };
        let args = transcode_args(Path::new("a.mp3"), Path::new("a.wav"), &opts);
        assert!(!args.iter().any(|a| a == "-b:a"));
        assert!(args.iter().any(|a| a == "pcm_s16le"));
    }
}
