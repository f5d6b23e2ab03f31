//! Asset identifiers and file-name hygiene.
//!
//! Identifiers are random bytes rendered as lowercase hex. Collisions are
//! treated as negligible and never checked for.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of random bytes behind an [`AssetId`] (16 hex characters).
pub const ASSET_ID_BYTES: usize = 8;

/// Fallback used when a supplied file name sanitizes to nothing.
pub const FALLBACK_NAME: &str = "file";

/// Produce a lowercase hex string from `len_bytes` bytes of OS entropy.
#[must_use]
pub fn new_identifier(len_bytes: usize) -> String {
    let mut buf = vec![0u8; len_bytes];
    rand::rngs::OsRng.fill_bytes(&mut buf);
    hex::encode(buf)
}

/// Opaque identifier of a registered asset.
///
/// Clients echo these back verbatim in job requests, so parsing is
/// deliberately permissive: any string is a candidate id and unknown ids are
/// reported by the registry lookup, not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    /// Create a new random id.
    #[must_use]
    pub fn generate() -> Self {
        Self(new_identifier(ASSET_ID_BYTES))
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for AssetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AssetId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Make a client-supplied file name safe to use as a single path component.
///
/// Path separators become underscores, surrounding whitespace is trimmed and
/// an empty result falls back to [`FALLBACK_NAME`]. Applying it twice yields
/// the same string.
pub fn sanitize_name(name: &str) -> String {
    let replaced = name.replace(['\\', '/'], "_");
    let trimmed = replaced.trim();
    if trimmed.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Drop the final extension of a file name (`clip.final.mp4` -> `clip.final`).
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[..idx],
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_is_lowercase_hex_of_requested_length() {
        let id = new_identifier(8);
        assert_eq!(id.len(), 16);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));

        assert_eq!(new_identifier(4).len(), 8);
        assert!(new_identifier(0).is_empty());
    }

    #[test]
    fn ids_are_unique() {
        let a = AssetId::generate();
        let b = AssetId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), ASSET_ID_BYTES * 2);
    }

    #[test]
    fn asset_id_serializes_as_plain_string() {
        let id = AssetId::from("00ff00ff00ff00ff");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"00ff00ff00ff00ff\"");
        let back: AssetId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn sanitize_replaces_separators() {
        assert_eq!(sanitize_name("../etc/passwd"), ".._etc_passwd");
        assert_eq!(sanitize_name("C:\\clips\\a.mp4"), "C:_clips_a.mp4");
    }

    #[test]
    fn sanitize_trims_and_falls_back() {
        assert_eq!(sanitize_name("  movie.mov \t"), "movie.mov");
        assert_eq!(sanitize_name(""), "file");
        assert_eq!(sanitize_name("   "), "file");
    }

    #[test]
    fn sanitize_never_yields_separator_or_empty() {
        let samples = [
            "", "/", "\\", "//\\", " / ", "a/b\\c", "name", " spaced name ", "x/", "\\y",
            "ünïcødé/ß", "\n\t", "....", "a b/c d",
        ];
        for s in samples {
            let out = sanitize_name(s);
            assert!(!out.is_empty(), "empty for {s:?}");
            assert!(!out.contains('/') && !out.contains('\\'), "separator for {s:?}");
        }
    }

    #[test]
    fn sanitize_is_idempotent() {
        for s in ["a/b", "  x ", "", "plain.jpg", "\\\\srv\\share"] {
            let once = sanitize_name(s);
            assert_eq!(sanitize_name(&once), once);
        }
    }

    #[test]
    fn strip_extension_drops_last_suffix_only() {
        assert_eq!(strip_extension("clip.mp4"), "clip");
        assert_eq!(strip_extension("clip.final.mp4"), "clip.final");
        assert_eq!(strip_extension("noext"), "noext");
    }
}
