//! Render calls: resolve, load, compile, merge, render.

use serde_json::{Map, Value};
use std::io;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::compiled::{CompiledTemplate, CompiledView};
use super::{RenderOptions, ViewEngine};
use crate::cache::{CacheStats, ViewKey};
use crate::config::ViewConfig;
use crate::context::{data_layer, merge};
use crate::core::{ViewError, ViewResult};
use crate::reply::Reply;
use crate::resolver::{PageResolver, ResolvedPage};
use crate::storage::TemplateStorage;

/// Which template a storage failure belongs to.
#[derive(Clone, Copy)]
enum Role {
    Page,
    Layout,
}

impl<S: TemplateStorage> ViewEngine<S> {
    /// Render `page` with `data` and no locals.
    pub async fn render(&self, page: &str, data: &Value) -> ViewResult<String> {
        self.dispatch(page, data, None, None).await
    }

    /// Render `page` with per-call locals and layout override.
    pub async fn render_with(
        &self,
        page: &str,
        data: &Value,
        options: &RenderOptions,
    ) -> ViewResult<String> {
        let layout = options.layout.as_ref().map(Option::as_deref);
        self.dispatch(page, data, options.locals.as_ref(), layout).await
    }

    /// Render `page` into `reply`.
    ///
    /// Locals come from the reply. The content type is set to
    /// `text/html; charset=<charset>` unless the host already set one. On
    /// failure nothing is written to the reply.
    pub async fn view<R: Reply + ?Sized>(
        &self,
        reply: &mut R,
        page: &str,
        data: &Value,
    ) -> ViewResult<()> {
        let body = self.dispatch(page, data, reply.locals(), None).await?;

        if reply.content_type().is_none() {
            reply.set_content_type(self.content_type.clone());
        }
        reply.send(body);
        Ok(())
    }

    /// Load and compile `page` with the configured layout, storing the result
    /// in the cache, without rendering it.
    pub async fn compile_page(&self, page: &str) -> ViewResult<ViewKey> {
        let resolved = self.resolver.resolve(page)?;
        let layout = self.resolve_layout(&resolved, None)?;
        let key = ViewKey::new(resolved.key.clone(), layout.as_ref().map(|l| l.key.clone()));

        self.compiled_view(&resolved, layout.as_ref(), &key).await?;
        Ok(key)
    }

    /// Drop cached entries that use `page`. Returns how many were removed.
    pub fn invalidate(&self, page: &str) -> ViewResult<usize> {
        let resolved = self.resolver.resolve(page)?;
        let removed = self.cache.invalidate(&resolved.key);
        tracing::debug!("Invalidated {} cached view(s) for '{}'", removed, resolved.key);
        Ok(removed)
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
        tracing::debug!("Cleared compiled view cache");
    }

    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    #[must_use]
    pub const fn is_production(&self) -> bool {
        self.production
    }

    #[must_use]
    pub const fn config(&self) -> &ViewConfig {
        &self.config
    }

    #[must_use]
    pub const fn resolver(&self) -> &PageResolver {
        &self.resolver
    }

    /// Content type set on replies that have none.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    async fn dispatch(
        &self,
        page: &str,
        data: &Value,
        locals: Option<&Map<String, Value>>,
        layout: Option<Option<&str>>,
    ) -> ViewResult<String> {
        let resolved = self.resolver.resolve(page)?;
        let data = data_layer(page, data)?;
        let layout = self.resolve_layout(&resolved, layout)?;
        let key = ViewKey::new(resolved.key.clone(), layout.as_ref().map(|l| l.key.clone()));

        let view = self.compiled_view(&resolved, layout.as_ref(), &key).await?;

        let context = merge(Some(&self.config.default_context), locals, data);

        view.render(context)
    }

    /// Resolve the layout for one call. `None` means the configured layout,
    /// `Some(None)` means no layout. A layout that is the page itself is
    /// skipped.
    fn resolve_layout(
        &self,
        page: &ResolvedPage,
        layout: Option<Option<&str>>,
    ) -> ViewResult<Option<ResolvedPage>> {
        let name = layout.unwrap_or(self.config.layout.as_deref());
        let Some(name) = name.filter(|name| !name.trim().is_empty()) else {
            return Ok(None);
        };

        let resolved = self.resolver.resolve(name)?;
        if resolved.key == page.key {
            tracing::trace!("Skipping layout '{}' for itself", resolved.key);
            return Ok(None);
        }
        Ok(Some(resolved))
    }

    async fn compiled_view(
        &self,
        page: &ResolvedPage,
        layout: Option<&ResolvedPage>,
        key: &ViewKey,
    ) -> ViewResult<Arc<CompiledView>> {
        if !self.production {
            let view = self.load_and_compile(page, layout).await?;
            self.cache.put(key.clone(), Arc::clone(&view));
            return Ok(view);
        }

        if let Some(view) = self.cache.get(key) {
            tracing::debug!("Cache hit for '{}'", key);
            return Ok(view);
        }
        tracing::debug!("Cache miss for '{}'", key);

        let lock = self
            .compile_locks
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock.lock().await;

        // Another call may have compiled it while we waited.
        if let Some(view) = self.cache.recheck(key) {
            tracing::debug!("Compiled by a concurrent call: '{}'", key);
            return Ok(view);
        }

        let result = self.load_and_compile(page, layout).await;
        if let Ok(view) = &result {
            self.cache.put(key.clone(), Arc::clone(view));
        }
        self.compile_locks.remove(key);
        result
    }

    async fn load_and_compile(
        &self,
        page: &ResolvedPage,
        layout: Option<&ResolvedPage>,
    ) -> ViewResult<Arc<CompiledView>> {
        let page = self.compile_template(page, Role::Page).await?;
        let layout = match layout {
            Some(layout) => Some(self.compile_template(layout, Role::Layout).await?),
            None => None,
        };

        Ok(Arc::new(CompiledView {
            page,
            layout,
        }))
    }

    async fn compile_template(
        &self,
        resolved: &ResolvedPage,
        role: Role,
    ) -> ViewResult<CompiledTemplate> {
        let source = self.load_source(resolved).await.map_err(|source| match role {
            Role::Page => ViewError::TemplateNotFound {
                page: resolved.key.to_string(),
                searched: resolved.candidates.clone(),
                source,
            },
            Role::Layout => ViewError::LayoutNotFound {
                layout: resolved.key.to_string(),
                searched: resolved.candidates.clone(),
                source,
            },
        })?;

        let engine = self.registry.get(&resolved.engine).ok_or_else(|| ViewError::UnknownEngine {
            page: resolved.key.to_string(),
            extension: Some(resolved.engine.clone()),
            available: self.registry.extensions(),
        })?;

        tracing::debug!("Compiling '{}' with {}", resolved.key, engine.name());
        let render = engine.compile(resolved.key.as_str(), &source).map_err(|e| {
            tracing::warn!("Failed to compile '{}': {}", resolved.key, e);
            e.into_view_error(resolved.key.as_str())
        })?;

        Ok(CompiledTemplate {
            key: resolved.key.clone(),
            render,
        })
    }

    /// Read the first candidate that exists. Only `NotFound` moves on to the
    /// next root; any other I/O failure is returned as is.
    async fn load_source(&self, resolved: &ResolvedPage) -> io::Result<String> {
        let mut last_error = None;

        for candidate in &resolved.candidates {
            match self.storage.read_to_string(candidate).await {
                Ok(source) => {
                    tracing::trace!("Loaded '{}' from {}", resolved.key, candidate.display());
                    return Ok(source);
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => last_error = Some(e),
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "no template roots configured")
        }))
    }
}
