//! External tool detection and management.
//!
//! The [`ToolRegistry`] discovers and caches the locations of the external CLI
//! tools (ffmpeg, ffprobe, magick, convert) and provides lookup methods for
//! the rest of the crate.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use fd_core::config::ToolsConfig;

/// Known tool names that the registry manages.
const KNOWN_TOOLS: &[&str] = &["ffmpeg", "ffprobe", "magick", "convert"];

/// ImageMagick front-ends, in order of preference.
const IMAGE_ASSEMBLERS: &[&str] = &["magick", "convert"];

/// Configuration for a single external tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Human-readable tool name (e.g. "ffmpeg").
    pub name: String,
    /// Resolved path to the executable.
    pub path: PathBuf,
    /// Maximum execution time before the tool is killed.
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
}

/// Serde helpers to (de)serialize `Duration` as whole seconds.
mod duration_secs {
    use serde::{self, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Availability information for a tool, returned by [`ToolRegistry::check_all`].
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ToolInfo {
    /// Tool name.
    pub name: String,
    /// Whether the tool was found.
    pub available: bool,
    /// Version string (first line of `-version` output), if available.
    pub version: Option<String>,
    /// Resolved path to the executable.
    #[schema(value_type = Option<String>)]
    pub path: Option<PathBuf>,
}

/// Registry holding discovered tool configurations.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, ToolConfig>,
}

impl ToolRegistry {
    /// Discover tools by searching `PATH` (or using overrides from config).
    ///
    /// For each known tool, if the [`ToolsConfig`] supplies a custom path
    /// **and** that path exists, it is used directly. Otherwise
    /// [`which::which`] is used to locate the tool in `PATH`. Tools that are
    /// not found are silently omitted from the registry.
    pub fn discover(tools_config: &ToolsConfig) -> Self {
        let mut tools = HashMap::new();
        let timeout = tools_config.timeout();

        for &name in KNOWN_TOOLS {
            let custom_path = match name {
                "ffmpeg" => tools_config.ffmpeg_path.as_deref(),
                "ffprobe" => tools_config.ffprobe_path.as_deref(),
                "magick" => tools_config.magick_path.as_deref(),
                _ => None,
            };

            let resolved = match custom_path {
                Some(p) if p.exists() => Some(p.to_path_buf()),
                // Custom path does not exist; fall back to PATH.
                _ => which::which(name).ok(),
            };

            if let Some(path) = resolved {
                tools.insert(
                    name.to_string(),
                    ToolConfig {
                        name: name.to_string(),
                        path,
                        timeout,
                    },
                );
            }
        }

        Self { tools }
    }

    /// Build a registry from explicit entries, bypassing discovery.
    pub fn from_configs(configs: impl IntoIterator<Item = ToolConfig>) -> Self {
        Self {
            tools: configs.into_iter().map(|c| (c.name.clone(), c)).collect(),
        }
    }

    /// Return a reference to the [`ToolConfig`] for the given tool, or an
    /// [`fd_core::Error::Tool`] if the tool was not found during discovery.
    pub fn require(&self, name: &str) -> fd_core::Result<&ToolConfig> {
        self.tools.get(name).ok_or_else(|| {
            fd_core::Error::tool(name, format!("{name} not found; is it installed and in PATH?"))
        })
    }

    /// The ImageMagick front-end to use: `magick` if present, else `convert`.
    pub fn image_assembler(&self) -> fd_core::Result<&ToolConfig> {
        IMAGE_ASSEMBLERS
            .iter()
            .find_map(|name| self.tools.get(*name))
            .ok_or_else(|| fd_core::Error::tool("magick", "ImageMagick not found (magick/convert)"))
    }

    /// Fail unless every tool the service depends on was found.
    pub fn ensure_required(&self) -> fd_core::Result<()> {
        self.require("ffmpeg")?;
        self.require("ffprobe")?;
        self.image_assembler()?;
        Ok(())
    }

    /// Check all known tools and return availability information.
    pub fn check_all(&self) -> Vec<ToolInfo> {
        KNOWN_TOOLS
            .iter()
            .map(|&name| match self.tools.get(name) {
                Some(cfg) => ToolInfo {
                    name: name.to_string(),
                    available: true,
                    version: detect_version(name, &cfg.path),
                    path: Some(cfg.path.clone()),
                },
                None => ToolInfo {
                    name: name.to_string(),
                    available: false,
                    version: None,
                    path: None,
                },
            })
            .collect()
    }
}

/// Run `<tool> -version` (or `--version` for ImageMagick) and return the
/// first line of stdout.
fn detect_version(name: &str, path: &Path) -> Option<String> {
    let version_arg = match name {
        "ffmpeg" | "ffprobe" => "-version",
        _ => "--version",
    };

    let output = std::process::Command::new(path)
        .arg(version_arg)
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .map(|s| s.to_string())
}
