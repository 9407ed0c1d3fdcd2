//! `folio.toml` loading.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;

use super::ViewConfig;
use crate::constants::DEFAULT_ENGINE_EXTENSION;
use crate::core::ViewResult;
use crate::engine::{EngineAdapter, EngineKind, EngineRegistry};

/// On-disk configuration: the view options plus a table naming the built-in
/// engine used for each extension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(flatten)]
    pub view: ViewConfig,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub engines: BTreeMap<String, EngineKind>,
}

impl ConfigFile {
    /// Load and parse a configuration file.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Load `path` if it exists, otherwise fall back to the defaults.
    pub async fn load_optional(path: &Path) -> Result<Self> {
        let exists = fs::try_exists(path)
            .await
            .with_context(|| format!("Failed to check for config at {}", path.display()))?;
        if exists {
            Self::load_from(path).await
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Engine table to use: the configured one, or `html = "tera"` and
    /// `hbs = "handlebars"` when none is configured.
    #[must_use]
    pub fn engine_kinds(&self) -> BTreeMap<String, EngineKind> {
        if self.engines.is_empty() {
            BTreeMap::from([
                ("hbs".to_string(), EngineKind::Handlebars),
                ("html".to_string(), EngineKind::Tera),
            ])
        } else {
            self.engines.clone()
        }
    }

    /// View options to build the engine with. Without an `[engines]` table
    /// the built-in `html` engine also serves extensionless pages.
    #[must_use]
    pub fn view_config(&self) -> ViewConfig {
        let mut view = self.view.clone();
        if self.engines.is_empty() && view.default_engine.is_none() {
            view.default_engine = Some(DEFAULT_ENGINE_EXTENSION.to_string());
        }
        view
    }

    /// Instantiate the configured engines with their passthrough options.
    pub fn build_registry(&self) -> ViewResult<EngineRegistry> {
        let mut registry = EngineRegistry::new();
        for (extension, kind) in self.engine_kinds() {
            let options = self.view.options.get(&extension);
            registry.register(&extension, EngineAdapter::from_kind(kind, options)?);
        }
        Ok(registry)
    }
}
