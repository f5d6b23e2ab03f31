//! Audio → converted audio.

use serde::{Deserialize, Serialize};

use fd_av::AudioTranscode;
use fd_core::{strip_extension, AssetId, AudioAsset, AudioFormat, Result, WorkDirs};

use super::{positive, require_items};
use crate::context::AppContext;

#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct ConvertAudioItem {
    pub id: String,
    /// One of mp3, wav, flac, aac, ogg, opus. Empty uses the default.
    #[serde(default)]
    pub format: String,
    /// Zero or negative leaves the encoder's choice, as do the fields below.
    #[serde(default)]
    pub bitrate_kbps: i64,
    #[serde(default)]
    pub sample_rate: i64,
    #[serde(default)]
    pub channels: i64,
}

#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct ConvertAudioRequest {
    #[serde(default)]
    pub items: Vec<ConvertAudioItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct ConvertAudioResult {
    pub id: String,
    pub name: String,
    /// Upper-case format name, e.g. `FLAC`.
    pub format: String,
    pub out_url: String,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ConvertAudioResponse {
    pub results: Vec<ConvertAudioResult>,
}

fn parse_format(requested: &str, default: &str) -> Result<AudioFormat> {
    if requested.trim().is_empty() {
        default.parse()
    } else {
        requested.parse()
    }
}

/// Convert every item. Formats are checked for the whole batch before the
/// first conversion starts.
pub async fn convert_audio(ctx: &AppContext, req: ConvertAudioRequest) -> Result<ConvertAudioResponse> {
    require_items(&req.items)?;

    let default_format = &ctx.defaults().audio_format;
    let formats = req
        .items
        .iter()
        .map(|item| parse_format(&item.format, default_format))
        .collect::<Result<Vec<_>>>()?;

    let mut results = Vec::with_capacity(req.items.len());
    for (item, format) in req.items.iter().zip(formats) {
        let audio = ctx.registry.resolve::<AudioAsset>(&AssetId::from(item.id.as_str()))?;

        let opts = AudioTranscode::new(
            format,
            positive(item.bitrate_kbps),
            positive(item.sample_rate),
            positive(item.channels),
        );
        let file_name = format!("{}.{}", strip_extension(&audio.name), format.extension());
        let output = ctx.dirs.audio_path(&file_name);

        let converted = ctx.toolkit.transcode_audio(&audio.path, &output, &opts).await?;
        tracing::info!(id = %audio.id, %format, output = %converted.display(), "audio converted");

        results.push(ConvertAudioResult {
            id: audio.id.to_string(),
            name: audio.name.clone(),
            format: format.to_string().to_uppercase(),
            out_url: WorkDirs::audio_url(&converted),
        });
    }

    Ok(ConvertAudioResponse { results })
}
