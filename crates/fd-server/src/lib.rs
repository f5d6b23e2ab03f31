//! fd-server: HTTP API, ingestion pipeline and job coordinators.
//!
//! This crate ties fd-core and fd-av together into a running server:
//!
//! - [`ingest`] stores multipart uploads and registers asset records
//! - [`jobs`] runs the video, images and audio batches against the
//!   [`fd_av::MediaToolkit`] seam
//! - [`router`] exposes both over axum, plus read-only file serving
//! - [`start`] wires everything from a [`Config`] and serves until a
//!   shutdown signal arrives

pub mod context;
pub mod error;
pub mod extract;
pub mod ingest;
pub mod jobs;
pub mod middleware;
pub mod router;
pub mod routes;

#[cfg(test)]
mod testing;

use std::net::SocketAddr;
use std::sync::Arc;

use fd_av::{FfmpegToolkit, MediaToolkit, ToolRegistry};
use fd_core::config::Config;

use crate::context::AppContext;

/// Start the framedeck server.
///
/// Creates the work directories, discovers the external tools and refuses
/// to start when a required one is missing. Returns after a shutdown
/// signal once in-flight requests have finished.
pub async fn start(config: Config) -> fd_core::Result<()> {
    for warning in config.validate() {
        tracing::warn!("Config warning: {warning}");
    }

    let dirs = config.work_dirs();
    dirs.create_all()?;
    tracing::info!("Work directory ready at {}", dirs.root.display());

    let tools = Arc::new(ToolRegistry::discover(&config.tools));
    for info in tools.check_all() {
        if info.available {
            tracing::info!(
                "Tool found: {} ({})",
                info.name,
                info.version.as_deref().unwrap_or("unknown version")
            );
        } else {
            tracing::debug!("Tool not found: {}", info.name);
        }
    }
    tools.ensure_required()?;

    let toolkit: Arc<dyn MediaToolkit> = Arc::new(FfmpegToolkit::new(tools.clone()));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| fd_core::Error::Internal(format!("Invalid server address: {e}")))?;

    let ctx = AppContext::new(config, tools, toolkit);
    let app = router::build_router(ctx);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| fd_core::Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    tracing::info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn start_fails_fast_without_tools() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.storage.work_root = tmp.path().join("work");
        config.server.host = "127.0.0.1".into();
        config.server.port = 0;
        let missing = tmp.path().join("no-such-binary");
        config.tools.ffmpeg_path = Some(missing.clone());
        config.tools.ffprobe_path = Some(missing.clone());
        config.tools.magick_path = Some(missing);

        // Tools on PATH still satisfy discovery.
        if ToolRegistry::discover(&config.tools).ensure_required().is_ok() {
            return;
        }

        let err = start(config).await.unwrap_err();
        assert!(matches!(err, fd_core::Error::Tool { .. }));
        assert!(tmp.path().join("work/uploads").is_dir());
    }
}
