//! Shared application state.
//!
//! [`AppContext`] is handed to every route handler through axum state. It is
//! built once at startup (or once per test) and only holds `Arc`s, so cloning
//! it per request is cheap and no handler ever reaches for global state.

use std::sync::Arc;

use fd_av::{MediaToolkit, ToolRegistry};
use fd_core::config::{Config, JobDefaults};
use fd_core::{AssetRegistry, WorkDirs};

#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub dirs: Arc<WorkDirs>,
    pub registry: Arc<AssetRegistry>,
    pub toolkit: Arc<dyn MediaToolkit>,
    pub tools: Arc<ToolRegistry>,
}

impl AppContext {
    /// Build a context with a fresh, empty asset registry.
    pub fn new(config: Config, tools: Arc<ToolRegistry>, toolkit: Arc<dyn MediaToolkit>) -> Self {
        let dirs = Arc::new(config.work_dirs());
        Self {
            config: Arc::new(config),
            dirs,
            registry: Arc::new(AssetRegistry::new()),
            toolkit,
            tools,
        }
    }

    pub fn defaults(&self) -> &JobDefaults {
        &self.config.defaults
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("work_root", &self.dirs.root)
            .field("tools", &self.tools)
            .finish_non_exhaustive()
    }
}
