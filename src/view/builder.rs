//! [`ViewEngine`] construction.

use dashmap::DashMap;

use super::ViewEngine;
use crate::cache::CompiledCache;
use crate::config::{EnvReader, ProcessEnv, ViewConfig, production_mode};
use crate::constants::html_content_type;
use crate::core::{ViewError, ViewResult};
use crate::engine::{EngineAdapter, EngineRegistry};
use crate::resolver::PageResolver;
use crate::storage::{FsStorage, TemplateStorage};

/// Collects engines, storage and environment before building a
/// [`ViewEngine`].
pub struct ViewEngineBuilder<S> {
    config: ViewConfig,
    registry: EngineRegistry,
    storage: S,
    env: Box<dyn EnvReader>,
}

impl ViewEngineBuilder<FsStorage> {
    pub(super) fn new(config: ViewConfig) -> Self {
        Self {
            config,
            registry: EngineRegistry::new(),
            storage: FsStorage,
            env: Box::new(ProcessEnv),
        }
    }
}

impl<S> ViewEngineBuilder<S> {
    /// Register `engine` for pages with extension `ext`.
    #[must_use]
    pub fn engine(mut self, ext: impl AsRef<str>, engine: EngineAdapter) -> Self {
        self.registry.register(ext, engine);
        self
    }

    /// Replace all registered engines.
    #[must_use]
    pub fn engines(mut self, registry: EngineRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Read templates from `storage` instead of the filesystem.
    #[must_use]
    pub fn storage<T: TemplateStorage>(self, storage: T) -> ViewEngineBuilder<T> {
        ViewEngineBuilder {
            config: self.config,
            registry: self.registry,
            storage,
            env: self.env,
        }
    }

    /// Environment consulted for production mode when the configuration
    /// leaves it unset.
    #[must_use]
    pub fn env(mut self, env: impl EnvReader + 'static) -> Self {
        self.env = Box::new(env);
        self
    }
}

impl<S: TemplateStorage> ViewEngineBuilder<S> {
    /// Validate the configuration and build the engine.
    pub fn build(self) -> ViewResult<ViewEngine<S>> {
        self.config.validate()?;

        if self.registry.is_empty() {
            return Err(ViewError::config("no template engine is registered"));
        }

        let resolver = PageResolver::new(&self.config, &self.registry)?;
        let production = production_mode(self.config.production, self.env.as_ref());
        let content_type = html_content_type(&self.config.charset);

        tracing::debug!(
            "Built view engine: engines [{}], {} template root(s), max_cache {}, production {}",
            self.registry.extensions().join(", "),
            resolver.roots().len(),
            self.config.max_cache,
            production
        );

        Ok(ViewEngine {
            cache: CompiledCache::new(self.config.max_cache),
            compile_locks: DashMap::new(),
            config: self.config,
            registry: self.registry,
            resolver,
            storage: self.storage,
            production,
            content_type,
        })
    }
}
