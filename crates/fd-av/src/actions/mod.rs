//! Media processing actions: frame extraction, PDF assembly and audio
//! transcoding.

mod audio;
mod frames;
mod pdf;

pub use audio::{transcode_args, transcode_audio, AudioTranscode};
pub use frames::{extract_frames, frame_filter, list_frames, FRAME_PATTERN};
pub use pdf::{assemble_pdf, pdf_args};
