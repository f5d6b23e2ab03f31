//! Axum router construction.
//!
//! Builds the application router: the upload and job routes with their
//! per-route body limits, the tool status and OpenAPI routes, read-only
//! serving of uploads and outputs, and the shared middleware stack.

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use fd_core::layout::{AUDIO_PREFIX, DOWNLOAD_PREFIX, UPLOADS_PREFIX};

use crate::context::AppContext;
use crate::middleware::request_id::request_id_middleware;
use crate::routes;

/// Path of the generated OpenAPI document.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health::health_check,
        routes::admin::tools,
        routes::videos::upload_videos,
        routes::videos::process_videos,
        routes::images::upload_images,
        routes::images::images_pdf,
        routes::audio::upload_audio,
        routes::audio::convert_audio,
    ),
    components(schemas(
        fd_core::VideoAsset,
        fd_core::ImageAsset,
        fd_core::AudioAsset,
        fd_core::AudioFormat,
        fd_av::ToolInfo,
        routes::videos::UploadVideosResponse,
        routes::images::UploadImagesResponse,
        routes::audio::UploadAudiosResponse,
        crate::jobs::ProcessItem,
        crate::jobs::ProcessRequest,
        crate::jobs::ProcessResult,
        crate::jobs::ProcessResponse,
        crate::jobs::ImagesPdfItem,
        crate::jobs::ImagesPdfRequest,
        crate::jobs::ImagesPdfResponse,
        crate::jobs::ConvertAudioItem,
        crate::jobs::ConvertAudioRequest,
        crate::jobs::ConvertAudioResult,
        crate::jobs::ConvertAudioResponse,
    ))
)]
pub struct ApiDoc;

fn body_limit(bytes: u64) -> DefaultBodyLimit {
    DefaultBodyLimit::max(usize::try_from(bytes).unwrap_or(usize::MAX))
}

/// Build the complete Axum router.
pub fn build_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let limits = ctx.config.limits.clone();
    let dirs = ctx.dirs.clone();
    let static_dir = ctx.config.server.static_dir.clone();

    let mut app = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api/tools", get(routes::admin::tools))
        .route(OPENAPI_PATH, get(|| async { Json(ApiDoc::openapi()) }))
        // Video
        .route(
            "/upload",
            post(routes::videos::upload_videos).layer(body_limit(limits.max_video_upload_bytes)),
        )
        .route("/process", post(routes::videos::process_videos))
        // Images
        .route(
            "/upload_images",
            post(routes::images::upload_images).layer(body_limit(limits.max_image_upload_bytes)),
        )
        .route("/images_pdf", post(routes::images::images_pdf))
        // Audio
        .route(
            "/upload_audio",
            post(routes::audio::upload_audio).layer(body_limit(limits.max_audio_upload_bytes)),
        )
        .route("/convert_audio", post(routes::audio::convert_audio))
        // Produced files and originals, read-only.
        .nest_service(DOWNLOAD_PREFIX, ServeDir::new(&dirs.pdfs))
        .nest_service(UPLOADS_PREFIX, ServeDir::new(&dirs.uploads))
        .nest_service(AUDIO_PREFIX, ServeDir::new(&dirs.audio))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx);

    if let Some(dir) = static_dir {
        if dir.exists() {
            tracing::info!("Serving static files from {}", dir.display());
            let index_path = dir.join("index.html");
            app = app.fallback_service(
                ServeDir::new(&dir)
                    .append_index_html_on_directories(true)
                    .not_found_service(ServeFile::new(index_path)),
            );
        } else {
            tracing::warn!("static_dir {} does not exist; not serving it", dir.display());
        }
    }

    app
}
