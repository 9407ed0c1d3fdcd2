//! Page resolution.
//!
//! Turns a requested page name into a [`PageKey`] (the storage-independent
//! cache key), the extension of the engine that renders it, and the list of
//! storage paths to try, one per template root. Resolution is pure path
//! computation; nothing here touches the disk.
//!
//! # Resolution Rules
//!
//! 1. A page whose extension is registered keeps it and uses that engine.
//! 2. Otherwise, with `include_view_extension` on (the default), `view_ext` is
//!    appended, or the default engine's extension when `view_ext` is unset.
//! 3. With `include_view_extension` off the page is used verbatim and the
//!    default engine renders it.
//!
//! The default engine is `default_engine` when configured, else the only
//! registered engine. When no engine can be chosen the page fails with
//! [`ViewError::UnknownEngine`].

mod path;

use std::fmt;
use std::path::PathBuf;

use crate::config::ViewConfig;
use crate::core::{ViewError, ViewResult};
use crate::engine::EngineRegistry;
use path::{join_root, normalize_page, page_extension};

/// Normalized, extension-resolved, root-independent name of a template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageKey(String);

impl PageKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Result of resolving one page name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPage {
    pub key: PageKey,
    /// Registry extension of the engine that renders this page.
    pub engine: String,
    /// Storage paths to try, in root order.
    pub candidates: Vec<PathBuf>,
}

/// Maps page names to [`ResolvedPage`]s for one view configuration.
#[derive(Debug, Clone)]
pub struct PageResolver {
    roots: Vec<PathBuf>,
    view_ext: Option<String>,
    include_view_extension: bool,
    default_engine: Option<String>,
    extensions: Vec<String>,
}

impl PageResolver {
    /// Build a resolver for `config` and the registered engines.
    ///
    /// Fails when `default_engine` names an extension with no engine.
    pub fn new(config: &ViewConfig, registry: &EngineRegistry) -> ViewResult<Self> {
        let default_engine = match &config.default_engine {
            Some(ext) => {
                let ext = ext.trim_start_matches('.').to_string();
                if !registry.contains(&ext) {
                    return Err(ViewError::config(format!(
                        "default_engine '{ext}' is not a registered engine (registered: {})",
                        registry.extensions().join(", ")
                    )));
                }
                Some(ext)
            }
            None => registry.sole_extension().map(str::to_string),
        };

        Ok(Self {
            roots: config.expanded_roots(),
            view_ext: config.view_ext.as_ref().map(|ext| ext.trim_start_matches('.').to_string()),
            include_view_extension: config.include_view_extension,
            default_engine,
            extensions: registry.extensions(),
        })
    }

    /// Resolve `page`.
    pub fn resolve(&self, page: &str) -> ViewResult<ResolvedPage> {
        if page.trim().is_empty() {
            return Err(ViewError::MissingPage);
        }

        let normalized = normalize_page(page).map_err(|reason| ViewError::ResolutionError {
            page: page.to_string(),
            reason,
        })?;

        let own_extension = page_extension(&normalized).map(str::to_string);

        let (logical, engine) = match own_extension.as_deref() {
            Some(ext) if self.is_registered(ext) => (normalized, ext.to_string()),
            _ if self.include_view_extension => {
                let Some(append) = self.view_ext.as_ref().or(self.default_engine.as_ref()) else {
                    return Err(self.unknown_engine(page, own_extension));
                };
                let engine = if self.is_registered(append) {
                    append.clone()
                } else {
                    match &self.default_engine {
                        Some(default) => default.clone(),
                        None => return Err(self.unknown_engine(page, Some(append.clone()))),
                    }
                };
                (format!("{normalized}.{append}"), engine)
            }
            _ => match &self.default_engine {
                Some(default) => (normalized, default.clone()),
                None => return Err(self.unknown_engine(page, own_extension)),
            },
        };

        let candidates = self.roots.iter().map(|root| join_root(root, &logical)).collect();

        tracing::trace!("Resolved page '{}' to '{}' ({} engine)", page, logical, engine);

        Ok(ResolvedPage {
            key: PageKey(logical),
            engine,
            candidates,
        })
    }

    /// Template roots, after `~`/environment expansion.
    #[must_use]
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Extensions with a registered engine.
    #[must_use]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    fn is_registered(&self, ext: &str) -> bool {
        self.extensions.iter().any(|known| known == ext)
    }

    fn unknown_engine(&self, page: &str, extension: Option<String>) -> ViewError {
        ViewError::UnknownEngine {
            page: page.to_string(),
            extension,
            available: self.extensions.clone(),
        }
    }
}
