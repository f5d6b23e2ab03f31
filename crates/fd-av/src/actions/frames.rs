//! Extract still frames from a video with ffmpeg.

use std::path::{Path, PathBuf};

use crate::command::ToolCommand;
use crate::tools::ToolRegistry;

/// Output pattern inside the frame directory. Zero padding keeps lexical
/// order equal to temporal order.
pub const FRAME_PATTERN: &str = "frame_%05d.jpg";

const FRAME_PREFIX: &str = "frame_";
const FRAME_SUFFIX: &str = ".jpg";

/// Video filter sampling `fps` frames per second, rounding up, from t=0.
pub fn frame_filter(fps: f64) -> String {
    format!("fps={fps}:round=up:start_time=0")
}

/// Extract frames of `input` into `out_dir` at `fps`, JPEG quality
/// `jpeg_quality` (ffmpeg `-q:v`, lower is better).
///
/// Returns the produced frame files in lexical (= temporal) order.
pub async fn extract_frames(
    tools: &ToolRegistry,
    input: &Path,
    out_dir: &Path,
    fps: f64,
    jpeg_quality: u32,
) -> fd_core::Result<Vec<PathBuf>> {
    let ffmpeg = tools.require("ffmpeg")?;
    let pattern = out_dir.join(FRAME_PATTERN);

    tracing::info!(input = %input.display(), fps, jpeg_quality, "extracting frames");

    let mut cmd = ToolCommand::for_tool(ffmpeg);
    cmd.args(["-hide_banner", "-loglevel", "error", "-nostdin", "-y"]);
    cmd.args(["-fflags", "+genpts"]);
    cmd.arg("-i");
    cmd.arg(input.to_string_lossy().as_ref());
    cmd.args(["-map", "0:v:0", "-vsync", "vfr"]);
    cmd.arg("-vf");
    cmd.arg(frame_filter(fps));
    cmd.arg("-q:v");
    cmd.arg(jpeg_quality.to_string());
    cmd.arg(pattern.to_string_lossy().as_ref());
    cmd.execute().await?;

    list_frames(out_dir)
}

/// Every `frame_*.jpg` in `dir`, sorted lexically.
pub fn list_frames(dir: &Path) -> fd_core::Result<Vec<PathBuf>> {
    let mut frames = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with(FRAME_PREFIX) && name.ends_with(FRAME_SUFFIX) {
            frames.push(entry.path());
        }
    }
    frames.sort();
    Ok(frames)
}
