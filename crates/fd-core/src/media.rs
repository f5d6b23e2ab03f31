//! Audio target formats and their fixed encoder mapping.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Target format of an audio conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Mp3,
    Wav,
    Flac,
    Aac,
    Ogg,
    Opus,
}

impl AudioFormat {
    /// Every supported format, in display order.
    pub const ALL: [AudioFormat; 6] = [
        AudioFormat::Mp3,
        AudioFormat::Wav,
        AudioFormat::Flac,
        AudioFormat::Aac,
        AudioFormat::Ogg,
        AudioFormat::Opus,
    ];

    /// The ffmpeg encoder used for this format.
    pub fn encoder(self) -> &'static str {
        match self {
            Self::Mp3 => "libmp3lame",
            Self::Wav => "pcm_s16le",
            Self::Flac => "flac",
            Self::Aac => "aac",
            Self::Ogg => "libvorbis",
            Self::Opus => "libopus",
        }
    }

    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Flac => "flac",
            Self::Aac => "aac",
            Self::Ogg => "ogg",
            Self::Opus => "opus",
        }
    }

    /// Whether a target bitrate means anything for this format.
    pub fn is_lossy(self) -> bool {
        matches!(self, Self::Mp3 | Self::Aac | Self::Ogg | Self::Opus)
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for AudioFormat {
    type Err = Error;

    /// Case- and whitespace-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.extension() == normalized)
            .ok_or_else(|| Error::Unsupported(format!("unsupported format: {normalized}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_and_space_insensitive() {
        assert_eq!(" MP3 ".parse::<AudioFormat>().unwrap(), AudioFormat::Mp3);
        assert_eq!("Opus".parse::<AudioFormat>().unwrap(), AudioFormat::Opus);
        assert_eq!("flac".parse::<AudioFormat>().unwrap(), AudioFormat::Flac);
    }

    #[test]
    fn unknown_format_is_unsupported() {
        let err = "xyz".parse::<AudioFormat>().unwrap_err();
        assert!(matches!(err, Error::Unsupported(_)));
        assert_eq!(err.to_string(), "unsupported format: xyz");
    }

    #[test]
    fn encoder_mapping() {
        assert_eq!(AudioFormat::Mp3.encoder(), "libmp3lame");
        assert_eq!(AudioFormat::Wav.encoder(), "pcm_s16le");
        assert_eq!(AudioFormat::Flac.encoder(), "flac");
        assert_eq!(AudioFormat::Aac.encoder(), "aac");
        assert_eq!(AudioFormat::Ogg.encoder(), "libvorbis");
        assert_eq!(AudioFormat::Opus.encoder(), "libopus");
    }

    #[test]
    fn only_lossy_formats_take_a_bitrate() {
        let lossy: Vec<_> = AudioFormat::ALL.into_iter().filter(|f| f.is_lossy()).collect();
        assert_eq!(
            lossy,
            vec![AudioFormat::Mp3, AudioFormat::Aac, AudioFormat::Ogg, AudioFormat::Opus]
        );
    }

    #[test]
    fn display_matches_extension() {
        for f in AudioFormat::ALL {
            assert_eq!(f.to_string(), f.extension());
        }
    }
}
