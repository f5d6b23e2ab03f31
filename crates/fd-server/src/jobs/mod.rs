//! Job coordinators.
//!
//! All three kinds follow one contract: items are handled one at a time in
//! submission order, ids are resolved against the registry, absent or zero
//! parameters fall back to the configured defaults, and the first failure
//! aborts the rest of the batch. Items finished before the failure keep
//! their outputs on disk but no partial result is returned.

pub mod audio;
pub mod images;
pub mod video;

use fd_core::{Error, Result};

pub use audio::{
    convert_audio, ConvertAudioItem, ConvertAudioRequest, ConvertAudioResponse, ConvertAudioResult,
};
pub use images::{images_to_pdf, ImagesPdfItem, ImagesPdfRequest, ImagesPdfResponse};
pub use video::{process_videos, ProcessItem, ProcessRequest, ProcessResponse, ProcessResult};

fn require_items<T>(items: &[T]) -> Result<()> {
    if items.is_empty() {
        return Err(Error::Validation("no items provided".into()));
    }
    Ok(())
}

/// `value` unless it is absent, zero or negative. Values past `u32::MAX`
/// saturate.
fn or_default(value: Option<i64>, default: u32) -> u32 {
    match value {
        Some(v) if v > 0 => positive(v),
        _ => default,
    }
}

/// `value` as a tool setting where 0 means unset.
fn positive(value: i64) -> u32 {
    if value <= 0 {
        0
    } else {
        u32::try_from(value).unwrap_or(u32::MAX)
    }
}
