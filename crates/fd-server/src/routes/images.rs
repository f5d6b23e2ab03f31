//! Image upload and images → PDF.

use axum::extract::State;
use axum::{Extension, Json};
use serde::Serialize;

use fd_core::ImageAsset;

use crate::context::AppContext;
use crate::error::AppError;
use crate::extract::{ApiJson, ApiMultipart};
use crate::ingest::{self, IMAGE_FIELD};
use crate::jobs::{self, ImagesPdfRequest, ImagesPdfResponse};
use crate::middleware::request_id::RequestId;

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UploadImagesResponse {
    pub images: Vec<ImageAsset>,
}

/// POST /upload_images
#[utoipa::path(
    post,
    path = "/upload_images",
    request_body(
        content = inline(Object),
        content_type = "multipart/form-data",
        description = "One or more files in the repeated `images` field"
    ),
    responses(
        (status = 200, description = "Images stored and registered", body = UploadImagesResponse),
        (status = 400, description = "No files in the `images` field")
    )
)]
pub async fn upload_images(
    State(ctx): State<AppContext>,
    Extension(request_id): Extension<RequestId>,
    ApiMultipart(mut multipart): ApiMultipart,
) -> Result<Json<UploadImagesResponse>, AppError> {
    let uploads = ingest::read_uploads(&mut multipart, IMAGE_FIELD, &ctx.dirs)
        .await
        .map_err(|e| request_id.reject(e))?;
    let images = ingest::ingest_images(&ctx, uploads)
        .await
        .map_err(|e| request_id.reject(e))?;
    Ok(Json(UploadImagesResponse { images }))
}

/// POST /images_pdf
#[utoipa::path(
    post,
    path = "/images_pdf",
    request_body = ImagesPdfRequest,
    responses(
        (status = 200, description = "PDF assembled", body = ImagesPdfResponse),
        (status = 400, description = "Empty batch or unknown image id"),
        (status = 502, description = "ImageMagick failed")
    )
)]
pub async fn images_pdf(
    State(ctx): State<AppContext>,
    Extension(request_id): Extension<RequestId>,
    ApiJson(payload): ApiJson<ImagesPdfRequest>,
) -> Result<Json<ImagesPdfResponse>, AppError> {
    let resp = jobs::images_to_pdf(&ctx, payload)
        .await
        .map_err(|e| request_id.reject(e))?;
    Ok(Json(resp))
}
