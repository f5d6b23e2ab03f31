//! Assemble an ordered list of images into one PDF with ImageMagick.

use std::path::{Path, PathBuf};

use crate::command::ToolCommand;
use crate::tools::ToolRegistry;

/// Arguments for ImageMagick: each input auto-oriented, then density,
/// quality and the output document.
pub fn pdf_args(images: &[PathBuf], output: &Path, density: u32, quality: u32) -> Vec<String> {
    let mut args = Vec::with_capacity(images.len() * 2 + 5);
    for img in images {
        args.push(img.to_string_lossy().into_owned());
        args.push("-auto-orient".to_string());
    }
    args.extend([
        "-density".to_string(),
        density.to_string(),
        "-quality".to_string(),
        quality.to_string(),
        output.to_string_lossy().into_owned(),
    ]);
    args
}

/// Write `images`, in order, as pages of `output`.
pub async fn assemble_pdf(
    tools: &ToolRegistry,
    images: &[PathBuf],
    output: &Path,
    density: u32,
    quality: u32,
) -> fd_core::Result<PathBuf> {
    let magick = tools.image_assembler()?;

    tracing::info!(
        pages = images.len(),
        output = %output.display(),
        density,
        quality,
        "assembling pdf with {}",
        magick.name
    );

    let mut cmd = ToolCommand::for_tool(magick);
    cmd.args(pdf_args(images, output, density, quality));
    cmd.execute().await?;

    Ok(output.to_path_buf())
}
