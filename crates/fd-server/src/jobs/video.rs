//! Video → frames → PDF.

use serde::{Deserialize, Serialize};

use fd_core::{strip_extension, AssetId, Error, Result, VideoAsset, WorkDirs};

use super::{or_default, require_items};
use crate::context::AppContext;

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct ProcessItem {
    pub id: String,
    /// Frames per second to sample; zero or absent uses the default.
    #[serde(default)]
    pub fps: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct ProcessRequest {
    #[serde(default)]
    pub items: Vec<ProcessItem>,
    /// Non-positive values use the default, as do the other tuning fields.
    pub jpeg_quality: Option<i64>,
    pub pdf_density: Option<i64>,
    pub pdf_quality: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct ProcessResult {
    pub id: String,
    pub name: String,
    pub duration_seconds: f64,
    pub fps: f64,
    /// `ceil(duration * fps)`. Display only; may differ from `frames_wrote`.
    pub estimated_frames: u64,
    pub frames_wrote: usize,
    pub pdf_url: String,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ProcessResponse {
    pub results: Vec<ProcessResult>,
}

/// Frame-count estimate shown to the client.
pub fn estimate_frames(duration_seconds: f64, fps: f64) -> u64 {
    let estimate = (duration_seconds * fps).ceil();
    if estimate.is_finite() && estimate > 0.0 {
        estimate as u64
    } else {
        0
    }
}

/// Output file name for a video's PDF: `<id>_<stem>.pdf`.
pub fn pdf_name(video: &VideoAsset) -> String {
    format!("{}_{}.pdf", video.id, strip_extension(&video.name))
}

/// Run a video batch.
pub async fn process_videos(ctx: &AppContext, req: ProcessRequest) -> Result<ProcessResponse> {
    require_items(&req.items)?;

    let defaults = ctx.defaults();
    let jpeg_quality = or_default(req.jpeg_quality, defaults.jpeg_quality);
    let density = or_default(req.pdf_density, defaults.pdf_density);
    let quality = or_default(req.pdf_quality, defaults.pdf_quality);

    let mut results = Vec::with_capacity(req.items.len());
    for item in &req.items {
        let video = ctx.registry.resolve::<VideoAsset>(&AssetId::from(item.id.as_str()))?;
        let fps = item.fps.filter(|f| *f > 0.0).unwrap_or_else(|| defaults.frame_rate());

        let frame_dir = ctx.dirs.frame_dir(&video.id);
        reset_dir(&frame_dir).await?;

        let frames = ctx
            .toolkit
            .extract_frames(&video.path, &frame_dir, fps, jpeg_quality)
            .await?;
        if frames.is_empty() {
            return Err(Error::tool("ffmpeg", format!("no frames extracted from {}", video.name)));
        }

        let output = ctx.dirs.pdf_path(&pdf_name(&video));
        let pdf = ctx.toolkit.assemble_pdf(&frames, &output, density, quality).await?;

        tracing::info!(id = %video.id, fps, frames = frames.len(), "video processed");

        results.push(ProcessResult {
            id: video.id.to_string(),
            name: video.name.clone(),
            duration_seconds: video.duration_seconds,
            fps,
            estimated_frames: estimate_frames(video.duration_seconds, fps),
            frames_wrote: frames.len(),
            pdf_url: WorkDirs::pdf_url(&pdf),
        });
    }

    Ok(ProcessResponse { results })
}

/// Empty `dir`, creating it if needed.
async fn reset_dir(dir: &std::path::Path) -> Result<()> {
    match tokio::fs::remove_dir_all(dir).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    tokio::fs::create_dir_all(dir).await?;
    Ok(())
}
