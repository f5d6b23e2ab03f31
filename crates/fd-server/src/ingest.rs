//! Upload ingestion: durable write, inspection, registration.
//!
//! Every file of a batch is written to `uploads/<id>/<name>` first. Only
//! when the whole batch is on disk are records built (probing video and
//! audio) and registered, so a batch that fails halfway never leaves a
//! registered record behind. Files already written for a failed batch stay
//! on disk unreferenced.

use std::io;
use std::path::PathBuf;

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use chrono::Utc;
use futures::TryStreamExt;
use tokio::io::{AsyncRead, AsyncWriteExt};
use tokio_util::io::StreamReader;

use fd_core::{
    sanitize_name, AssetId, AssetKind, AssetRegistry, AudioAsset, AudioProbe, Error, ImageAsset,
    Result, VideoAsset, WorkDirs,
};

use crate::context::AppContext;

/// Multipart field carrying video files.
pub const VIDEO_FIELD: &str = "videos";
/// Multipart field carrying image files.
pub const IMAGE_FIELD: &str = "images";
/// Multipart field carrying audio files.
pub const AUDIO_FIELD: &str = "audios";

/// A file that has been durably written but not yet registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    pub id: AssetId,
    pub name: String,
    pub rel_path: String,
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Copy `reader` to `uploads/<new id>/<sanitized name>`.
///
/// The write only counts once the data is flushed and synced; a failure at
/// any step is returned as-is.
pub async fn store_upload<R>(dirs: &WorkDirs, file_name: &str, reader: &mut R) -> Result<StoredUpload>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let id = AssetId::generate();
    let name = sanitize_name(file_name);
    let path = dirs.upload_path(&id, &name);

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut file = tokio::fs::File::create(&path).await?;
    let size_bytes = tokio::io::copy(reader, &mut file).await?;
    file.flush().await?;
    file.sync_all().await?;

    tracing::debug!(%id, name = %name, size_bytes, "upload stored");

    Ok(StoredUpload {
        rel_path: WorkDirs::upload_rel_path(&id, &name),
        id,
        name,
        path,
        size_bytes,
    })
}

/// Store every part of `multipart` named `field`, in submission order.
///
/// Parts under other names are skipped. Zero matching parts is a
/// validation error.
pub async fn read_uploads(
    multipart: &mut Multipart,
    field: &str,
    dirs: &WorkDirs,
) -> Result<Vec<StoredUpload>> {
    let mut stored = Vec::new();

    while let Some(part) = multipart.next_field().await.map_err(multipart_error)? {
        if part.name() != Some(field) {
            continue;
        }
        // Plain form fields carry no filename.
        let Some(file_name) = part.file_name().map(str::to_string) else {
            continue;
        };
        let stream = part.map_err(io::Error::other);
        let mut reader = std::pin::pin!(StreamReader::new(stream));

        let upload = store_upload(dirs, &file_name, &mut reader)
            .await
            .map_err(|e| match e {
                Error::Io { source } if is_payload_too_large(&source) => {
                    Error::PayloadTooLarge(format!("upload '{file_name}' exceeds the size limit"))
                }
                other => other,
            })?;
        stored.push(upload);
    }

    if stored.is_empty() {
        return Err(Error::Validation(format!(
            "no files uploaded (field must be '{field}')"
        )));
    }

    Ok(stored)
}

fn multipart_error(err: MultipartError) -> Error {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        Error::PayloadTooLarge(err.body_text())
    } else {
        Error::Validation(format!("invalid multipart body: {}", err.body_text()))
    }
}

fn is_payload_too_large(err: &io::Error) -> bool {
    err.get_ref()
        .and_then(|inner| inner.downcast_ref::<MultipartError>())
        .is_some_and(|e| e.status() == StatusCode::PAYLOAD_TOO_LARGE)
}

/// Register a finished batch, returning the records in input order.
fn register_all<A: AssetKind + Clone>(registry: &AssetRegistry, records: Vec<A>) -> Result<Vec<A>> {
    records
        .into_iter()
        .map(|record| registry.register(record).map(|arc| (*arc).clone()))
        .collect()
}

/// Build and register video records. A failed duration probe records zero.
pub async fn ingest_videos(ctx: &AppContext, uploads: Vec<StoredUpload>) -> Result<Vec<VideoAsset>> {
    let mut records = Vec::with_capacity(uploads.len());
    for upload in uploads {
        let duration_seconds = match ctx.toolkit.inspect(&upload.path).await {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(id = %upload.id, error = %e, "duration probe failed; recording 0");
                0.0
            }
        };
        records.push(VideoAsset {
            id: upload.id,
            name: upload.name,
            rel_path: upload.rel_path,
            path: upload.path,
            size_bytes: upload.size_bytes,
            duration_seconds,
            uploaded_at: Utc::now(),
        });
    }

    let videos = register_all(&ctx.registry, records)?;
    tracing::info!(count = videos.len(), "videos registered");
    Ok(videos)
}

/// Build and register image records. Images are not inspected.
pub async fn ingest_images(ctx: &AppContext, uploads: Vec<StoredUpload>) -> Result<Vec<ImageAsset>> {
    let records = uploads
        .into_iter()
        .map(|upload| ImageAsset {
            url: WorkDirs::upload_url(&upload.rel_path),
            id: upload.id,
            name: upload.name,
            rel_path: upload.rel_path,
            path: upload.path,
            size_bytes: upload.size_bytes,
            uploaded_at: Utc::now(),
        })
        .collect();

    let images = register_all(&ctx.registry, records)?;
    tracing::info!(count = images.len(), "images registered");
    Ok(images)
}

/// Build and register audio records from a best-effort full probe.
pub async fn ingest_audios(ctx: &AppContext, uploads: Vec<StoredUpload>) -> Result<Vec<AudioAsset>> {
    let mut records = Vec::with_capacity(uploads.len());
    for upload in uploads {
        let probe = ctx
            .toolkit
            .inspect_full(&upload.path)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(id = %upload.id, error = %e, "audio probe failed");
                AudioProbe::default()
            });
        let record = AudioAsset {
            id: upload.id,
            name: upload.name,
            rel_path: upload.rel_path,
            path: upload.path,
            size_bytes: upload.size_bytes,
            uploaded_at: Utc::now(),
            duration_seconds: 0.0,
            codec: String::new(),
            channels: 0,
            sample_rate: 0,
            bitrate_kbps: 0,
            probe_json: String::new(),
        }
        .with_probe(probe);
        records.push(record);
    }

    let audios = register_all(&ctx.registry, records)?;
    tracing::info!(count = audios.len(), "audio files registered");
    Ok(audios)
}
