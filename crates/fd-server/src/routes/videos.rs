//! Video upload and video → PDF processing.

use axum::extract::State;
use axum::{Extension, Json};
use serde::Serialize;

use fd_core::VideoAsset;

use crate::context::AppContext;
use crate::error::AppError;
use crate::extract::{ApiJson, ApiMultipart};
use crate::ingest::{self, VIDEO_FIELD};
use crate::jobs::{self, ProcessRequest, ProcessResponse};
use crate::middleware::request_id::RequestId;

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UploadVideosResponse {
    pub videos: Vec<VideoAsset>,
}

/// POST /upload
#[utoipa::path(
    post,
    path = "/upload",
    request_body(
        content = inline(Object),
        content_type = "multipart/form-data",
        description = "One or more files in the repeated `videos` field"
    ),
    responses(
        (status = 200, description = "Videos stored and registered", body = UploadVideosResponse),
        (status = 400, description = "No files in the `videos` field"),
        (status = 413, description = "Upload exceeds the video size limit")
    )
)]
pub async fn upload_videos(
    State(ctx): State<AppContext>,
    Extension(request_id): Extension<RequestId>,
    ApiMultipart(mut multipart): ApiMultipart,
) -> Result<Json<UploadVideosResponse>, AppError> {
    let uploads = ingest::read_uploads(&mut multipart, VIDEO_FIELD, &ctx.dirs)
        .await
        .map_err(|e| request_id.reject(e))?;
    let videos = ingest::ingest_videos(&ctx, uploads)
        .await
        .map_err(|e| request_id.reject(e))?;
    Ok(Json(UploadVideosResponse { videos }))
}

/// POST /process
#[utoipa::path(
    post,
    path = "/process",
    request_body = ProcessRequest,
    responses(
        (status = 200, description = "One PDF per video", body = ProcessResponse),
        (status = 400, description = "Empty batch or unknown video id"),
        (status = 502, description = "ffmpeg or ImageMagick failed"),
        (status = 504, description = "A tool ran past its deadline")
    )
)]
pub async fn process_videos(
    State(ctx): State<AppContext>,
    Extension(request_id): Extension<RequestId>,
    ApiJson(payload): ApiJson<ProcessRequest>,
) -> Result<Json<ProcessResponse>, AppError> {
    let resp = jobs::process_videos(&ctx, payload)
        .await
        .map_err(|e| request_id.reject(e))?;
    Ok(Json(resp))
}
