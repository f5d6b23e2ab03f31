//! Unified error type for framedeck.
//!
//! All crates funnel their failures into [`Error`], which carries enough context
//! for API handlers to derive an HTTP status code via [`Error::http_status`].

use std::fmt;
use std::time::Duration;

/// Unified error type covering all failure modes in framedeck.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Request data failed validation (missing fields, bad multipart, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A job referenced an asset id the registry does not know.
    #[error("unknown {kind} id: {id}")]
    UnknownAsset {
        /// The asset kind that was looked up ("video", "image", "audio").
        kind: &'static str,
        /// The identifier supplied by the client.
        id: String,
    },

    /// A parameter value is outside the supported set.
    #[error("{0}")]
    Unsupported(String),

    /// A conflicting resource already exists.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// An upload exceeded the configured size limit.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// An external tool (ffmpeg, ffprobe, magick) returned an error.
    #[error("Tool error [{tool}]: {message}")]
    Tool {
        /// Name of the tool that failed.
        tool: String,
        /// Human-readable error description, usually the tool's stderr.
        message: String,
    },

    /// An external tool ran past its deadline and was killed.
    #[error("Tool timeout [{tool}]: killed after {after:?}")]
    Timeout {
        /// Name of the tool that timed out.
        tool: String,
        /// The deadline that was exceeded.
        after: Duration,
    },

    /// Media probing produced output we could not interpret.
    #[error("Probe error: {0}")]
    Probe(String),

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an appropriate HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            Error::UnknownAsset { .. } => 400,
            Error::Unsupported(_) => 400,
            Error::Conflict(_) => 409,
            Error::PayloadTooLarge(_) => 413,
            Error::Io { .. } => 500,
            Error::Tool { .. } => 502,
            Error::Timeout { .. } => 504,
            Error::Probe(_) => 422,
            Error::Internal(_) => 500,
        }
    }

    /// Short machine-readable code used in JSON error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Validation(_) => "validation_error",
            Error::UnknownAsset { .. } => "unknown_asset",
            Error::Unsupported(_) => "unsupported",
            Error::Conflict(_) => "conflict",
            Error::PayloadTooLarge(_) => "payload_too_large",
            Error::Io { .. } => "io_error",
            Error::Tool { .. } => "tool_error",
            Error::Timeout { .. } => "tool_timeout",
            Error::Probe(_) => "probe_error",
            Error::Internal(_) => "internal_error",
        }
    }

    /// Convenience constructor for [`Error::UnknownAsset`].
    pub fn unknown_asset(kind: &'static str, id: impl fmt::Display) -> Self {
        Error::UnknownAsset {
            kind,
            id: id.to_string(),
        }
    }

    /// Convenience constructor for [`Error::Tool`].
    pub fn tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Tool {
            tool: tool.into(),
            message: message.into(),
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
