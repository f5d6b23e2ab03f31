//! fd-core: shared types, identifiers, errors, configuration, and the asset
//! registry.
//!
//! This crate is the foundational dependency for the other fd-* crates. It
//! owns the asset records produced by ingestion, the process-lifetime
//! [`AssetRegistry`], the unified error type, and the on-disk work layout
//! that maps produced files to download URLs.

pub mod asset;
pub mod config;
pub mod error;
pub mod ids;
pub mod layout;
pub mod media;
pub mod registry;

// Re-export the most commonly used items at the crate root.
pub use asset::{AudioAsset, AudioProbe, ImageAsset, VideoAsset};
pub use error::{Error, Result};
pub use ids::{new_identifier, sanitize_name, strip_extension, AssetId};
pub use layout::WorkDirs;
pub use media::AudioFormat;
pub use registry::{AssetKind, AssetRegistry};
