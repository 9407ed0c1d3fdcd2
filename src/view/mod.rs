//! Render dispatcher.
//!
//! [`ViewEngine`] is the single entry point hosts call to turn a page name and
//! render data into a rendered body. One render call runs:
//!
//! 1. resolve the page (and layout) name with the [`PageResolver`]
//! 2. obtain a compiled view, from the cache in production mode or freshly
//!    loaded and compiled otherwise
//! 3. merge default context, locals and call data
//! 4. render the page, then the layout around it
//!
//! # Production mode
//!
//! In production the compiled-template cache is trusted for reads: a page is
//! read from storage and compiled once, then reused until evicted or
//! invalidated. Concurrent misses on the same key wait for a single compile.
//! Outside production every call re-reads and recompiles so template edits
//! show up immediately.
//!
//! # Examples
//!
//! ```rust,no_run
//! use folio::config::ViewConfig;
//! use folio::engine::EngineAdapter;
//! use folio::view::ViewEngine;
//! use serde_json::json;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let engine = ViewEngine::builder(ViewConfig::new().with_templates("views"))
//!     .engine("html", EngineAdapter::tera())
//!     .build()?;
//!
//! let html = engine.render("index", &json!({ "title": "Home" })).await?;
//! # Ok(())
//! # }
//! ```

mod builder;
mod compiled;
mod dispatch;


pub use builder::ViewEngineBuilder;

use dashmap::DashMap;
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::cache::{CompiledCache, ViewKey};
use crate::config::ViewConfig;
use crate::engine::EngineRegistry;
use crate::resolver::PageResolver;
use crate::storage::{FsStorage, TemplateStorage};
use compiled::CompiledView;

/// Renders pages through registered engines with a shared compiled cache.
///
/// Cheap to share behind an `Arc`; every method takes `&self`.
pub struct ViewEngine<S: TemplateStorage = FsStorage> {
    config: ViewConfig,
    registry: EngineRegistry,
    resolver: PageResolver,
    storage: S,
    cache: CompiledCache<Arc<CompiledView>>,
    compile_locks: DashMap<ViewKey, Arc<Mutex<()>>>,
    production: bool,
    content_type: String,
}

impl ViewEngine<FsStorage> {
    /// Start building an engine for `config`.
    #[must_use]
    pub fn builder(config: ViewConfig) -> ViewEngineBuilder<FsStorage> {
        ViewEngineBuilder::new(config)
    }
}

impl<S: TemplateStorage> std::fmt::Debug for ViewEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewEngine")
            .field("engines", &self.registry.extensions())
            .field("roots", &self.resolver.roots())
            .field("production", &self.production)
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}

/// Per-call overrides for [`ViewEngine::render_with`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOptions {
    /// Request-scoped data, merged above the default context.
    pub locals: Option<Map<String, Value>>,
    /// `Some(Some(name))` replaces the configured layout, `Some(None)`
    /// disables it, `None` keeps it.
    pub layout: Option<Option<String>>,
}

impl RenderOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_locals(mut self, locals: Map<String, Value>) -> Self {
        self.locals = Some(locals);
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = Some(Some(layout.into()));
        self
    }

    #[must_use]
    pub fn without_layout(mut self) -> Self {
        self.layout = Some(None);
        self
    }
}
