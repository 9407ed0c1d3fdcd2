//! Engine setup shared by the CLI commands.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::ConfigFile;
use crate::constants::DEFAULT_CONFIG_FILE;
use crate::view::ViewEngine;

/// Global options that decide how the engine is built.
#[derive(Debug, Clone, Default)]
pub struct EngineSettings {
    pub config_path: Option<PathBuf>,
    pub templates: Vec<PathBuf>,
    pub production: bool,
}

impl EngineSettings {
    /// Load the configuration file with command-line overrides applied.
    pub async fn load_config(&self) -> Result<ConfigFile> {
        let mut file = match &self.config_path {
            Some(path) => ConfigFile::load_from(path).await?,
            None => ConfigFile::load_optional(Path::new(DEFAULT_CONFIG_FILE)).await?,
        };

        if !self.templates.is_empty() {
            file.view.templates = self.templates.clone();
        }
        if self.production {
            file.view.production = Some(true);
        }
        Ok(file)
    }

    /// Build a filesystem-backed engine from the loaded configuration.
    pub fn build_engine(file: &ConfigFile) -> Result<ViewEngine> {
        let registry = file.build_registry().context("Failed to set up template engines")?;
        ViewEngine::builder(file.view_config())
            .engines(registry)
            .build()
            .context("Failed to build view engine")
    }
}
