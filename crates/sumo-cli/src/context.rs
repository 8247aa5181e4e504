//! Per-invocation context shared by all commands

use crate::config::CliConfig;
use crate::error::{CliError, Result};
use std::path::Path;
use sumo_core::{Application, FsComponentStore};
use sumo_fs::NormalizedPath;

#[derive(Debug, Clone)]
pub struct Context {
    pub app_path: NormalizedPath,
    pub config: CliConfig,
    pub store: FsComponentStore,
}

impl Context {
    pub fn new(app_path: &Path, config: CliConfig) -> Self {
        Self {
            app_path: NormalizedPath::new(app_path),
            config,
            store: FsComponentStore::new(),
        }
    }

    /// Load the configured overlay chain of the application directory.
    pub fn load_application(&self) -> Result<Application> {
        Ok(Application::load(
            &self.store,
            self.app_path.clone(),
            self.config.overlays.as_slice(),
        )?)
    }

    /// Directory of a configured overlay.
    pub fn overlay_dir(&self, overlay: &str) -> Result<NormalizedPath> {
        if !self.config.overlays.iter().any(|o| o == overlay) {
            return Err(CliError::user(format!(
                "Overlay '{overlay}' is not part of the overlay chain ({})",
                self.config.overlays.join(", ")
            )));
        }
        Ok(self.app_path.join(overlay))
    }
}
