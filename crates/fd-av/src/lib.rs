//! # fd-av
//!
//! External tool management and invocation for framedeck.
//!
//! This crate provides:
//!
//! - **Tool discovery** ([`ToolRegistry`]) -- find and cache paths to ffmpeg,
//!   ffprobe and an ImageMagick front-end (`magick` or `convert`).
//! - **Command execution** ([`ToolCommand`]) -- async builder with a deadline
//!   that kills the child process when it expires.
//! - **Probing** ([`probe`]) -- duration and full audio probes via ffprobe.
//! - **Actions** ([`actions`]) -- frame extraction, PDF assembly and audio
//!   transcoding.
//! - **The adapter seam** ([`MediaToolkit`]) -- the trait the job
//!   coordinators call, with [`FfmpegToolkit`] as the real implementation.

pub mod actions;
pub mod command;
pub mod probe;
pub mod toolkit;
pub mod tools;

// ---- Re-exports for convenience ----

pub use actions::{assemble_pdf, extract_frames, transcode_audio, AudioTranscode};
pub use command::{ToolCommand, ToolOutput};
pub use toolkit::{FfmpegToolkit, MediaToolkit};
pub use tools::{ToolConfig, ToolInfo, ToolRegistry};
