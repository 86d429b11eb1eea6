//! Shared application state for axum handlers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use homehub_domain::settings::DashboardSettings;

/// Application state shared across all axum handlers.
///
/// Everything is immutable after startup; cloning only bumps the `Arc`s.
#[derive(Clone)]
pub struct AppState {
    settings: Arc<DashboardSettings>,
    assets_dir: Arc<PathBuf>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(settings: DashboardSettings, assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            settings: Arc::new(settings),
            assets_dir: Arc::new(assets_dir.into()),
        }
    }

    /// Settings handed to the browser client.
    #[must_use]
    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    /// Directory holding the compiled dashboard.
    #[must_use]
    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }
}
