//! Audio upload and conversion.

use axum::extract::State;
use axum::{Extension, Json};
use serde::Serialize;

use fd_core::AudioAsset;

use crate::context::AppContext;
use crate::error::AppError;
use crate::extract::{ApiJson, ApiMultipart};
use crate::ingest::{self, AUDIO_FIELD};
use crate::jobs::{self, ConvertAudioRequest, ConvertAudioResponse};
use crate::middleware::request_id::RequestId;

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UploadAudiosResponse {
    pub audios: Vec<AudioAsset>,
}

/// POST /upload_audio
#[utoipa::path(
    post,
    path = "/upload_audio",
    request_body(
        content = inline(Object),
        content_type = "multipart/form-data",
        description = "One or more files in the repeated `audios` field"
    ),
    responses(
        (status = 200, description = "Audio stored, probed and registered", body = UploadAudiosResponse),
        (status = 400, description = "No files in the `audios` field")
    )
)]
pub async fn upload_audio(
    State(ctx): State<AppContext>,
    Extension(request_id): Extension<RequestId>,
    ApiMultipart(mut multipart): ApiMultipart,
) -> Result<Json<UploadAudiosResponse>, AppError> {
    let uploads = ingest::read_uploads(&mut multipart, AUDIO_FIELD, &ctx.dirs)
        .await
        .map_err(|e| request_id.reject(e))?;
    let audios = ingest::ingest_audios(&ctx, uploads)
        .await
        .map_err(|e| request_id.reject(e))?;
    Ok(Json(UploadAudiosResponse { audios }))
}

/// POST /convert_audio
#[utoipa::path(
    post,
    path = "/convert_audio",
    request_body = ConvertAudioRequest,
    responses(
        (status = 200, description = "Converted files", body = ConvertAudioResponse),
        (status = 400, description = "Empty batch, unknown audio id or unsupported format"),
        (status = 502, description = "ffmpeg failed")
    )
)]
pub async fn convert_audio(
    State(ctx): State<AppContext>,
    Extension(request_id): Extension<RequestId>,
    ApiJson(payload): ApiJson<ConvertAudioRequest>,
) -> Result<Json<ConvertAudioResponse>, AppError> {
    let resp = jobs::convert_audio(&ctx, payload)
        .await
        .map_err(|e| request_id.reject(e))?;
    Ok(Json(resp))
}
