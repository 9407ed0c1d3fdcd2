//! View configuration.
//!
//! [`ViewConfig`] holds every option the render dispatcher understands. It is
//! plain data: it can be built in code with the `with_*` methods or
//! deserialized from the `folio.toml` file used by the CLI (see
//! [`ConfigFile`]). Template engines are not part of it because adapters are
//! live objects; they are registered on the
//! [`ViewEngineBuilder`](crate::view::ViewEngineBuilder) instead.
//!
//! # File Format
//!
//! ```toml
//! templates = ["templates", "~/shared/templates"]
//! layout = "layout"
//! charset = "utf-8"
//! max_cache = 100
//! production = true
//!
//! [default_context]
//! site = "Example"
//!
//! [engines]
//! html = "tera"
//! hbs = "handlebars"
//!
//! [options.hbs]
//! strict_mode = false
//! ```
//!
//! # Production Mode
//!
//! `production` set explicitly always wins. When it is left out, the
//! [`EnvReader`] handed to the builder decides: production mode is on when
//! `FOLIO_ENV` is `production`.

mod env;
mod file;

pub use env::{EnvReader, ProcessEnv, StaticEnv, production_mode};
pub use file::ConfigFile;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

use crate::constants::{DEFAULT_CHARSET, DEFAULT_MAX_CACHE, DEFAULT_TEMPLATES_DIR};
use crate::core::{ViewError, ViewResult};

/// Options recognized by the render dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Template root directories, searched in order.
    #[serde(alias = "root", deserialize_with = "one_or_many")]
    pub templates: Vec<PathBuf>,

    /// Extension appended to pages without a recognized one.
    pub view_ext: Option<String>,

    /// Whether to append an extension to pages that lack a recognized one.
    pub include_view_extension: bool,

    /// Layout template wrapped around every page.
    pub layout: Option<String>,

    /// Lowest-precedence render data.
    pub default_context: Map<String, Value>,

    /// Engine-specific options keyed by engine extension. Opaque to the core.
    pub options: Map<String, Value>,

    /// Charset advertised in the `Content-Type` header.
    pub charset: String,

    /// Capacity of the compiled-template cache.
    pub max_cache: usize,

    /// Trust the compiled-template cache. `None` defers to the environment.
    pub production: Option<bool>,

    /// Extension of the engine used for pages without a recognized extension.
    pub default_engine: Option<String>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            templates: vec![PathBuf::from(DEFAULT_TEMPLATES_DIR)],
            view_ext: None,
            include_view_extension: true,
            layout: None,
            default_context: Map::new(),
            options: Map::new(),
            charset: DEFAULT_CHARSET.to_string(),
            max_cache: DEFAULT_MAX_CACHE,
            production: None,
            default_engine: None,
        }
    }
}

impl ViewConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the template roots with a single directory.
    #[must_use]
    pub fn with_templates(mut self, root: impl Into<PathBuf>) -> Self {
        self.templates = vec![root.into()];
        self
    }

    /// Append an additional template root, searched after the existing ones.
    #[must_use]
    pub fn with_template_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.templates.push(root.into());
        self
    }

    #[must_use]
    pub fn with_view_ext(mut self, ext: impl Into<String>) -> Self {
        self.view_ext = Some(ext.into());
        self
    }

    #[must_use]
    pub const fn with_include_view_extension(mut self, include: bool) -> Self {
        self.include_view_extension = include;
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = Some(layout.into());
        self
    }

    /// Set the default context. Non-object values are ignored.
    #[must_use]
    pub fn with_default_context(mut self, context: Value) -> Self {
        if let Value::Object(map) = context {
            self.default_context = map;
        }
        self
    }

    #[must_use]
    pub fn with_engine_options(mut self, extension: impl Into<String>, options: Value) -> Self {
        self.options.insert(extension.into(), options);
        self
    }

    #[must_use]
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }

    #[must_use]
    pub const fn with_max_cache(mut self, max_cache: usize) -> Self {
        self.max_cache = max_cache;
        self
    }

    #[must_use]
    pub const fn with_production(mut self, production: bool) -> Self {
        self.production = Some(production);
        self
    }

    #[must_use]
    pub fn with_default_engine(mut self, extension: impl Into<String>) -> Self {
        self.default_engine = Some(extension.into());
        self
    }

    /// Template roots with `~` and environment variables expanded. A root
    /// that fails to expand is kept literally.
    #[must_use]
    pub fn expanded_roots(&self) -> Vec<PathBuf> {
        self.templates
            .iter()
            .map(|root| {
                let raw = root.to_string_lossy();
                match shellexpand::full(&raw) {
                    Ok(expanded) => PathBuf::from(expanded.as_ref()),
                    Err(e) => {
                        tracing::warn!("Could not expand template root '{}': {}", raw, e);
                        root.clone()
                    }
                }
            })
            .collect()
    }

    /// Check option values that do not depend on the registered engines.
    pub fn validate(&self) -> ViewResult<()> {
        if self.templates.is_empty() {
            return Err(ViewError::config("at least one template root is required"));
        }
        if self.charset.trim().is_empty() {
            return Err(ViewError::config("charset must not be empty"));
        }
        if self.view_ext.as_deref().is_some_and(|ext| ext.trim_start_matches('.').is_empty()) {
            return Err(ViewError::config("view_ext must not be empty"));
        }
        Ok(())
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(PathBuf),
        Many(Vec<PathBuf>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(path) => vec![path],
        OneOrMany::Many(paths) => paths,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = ViewConfig::default();
        assert_eq!(config.templates, vec![PathBuf::from("templates")]);
        assert_eq!(config.charset, "utf-8");
        assert_eq!(config.max_cache, 100);
        assert!(config.include_view_extension);
        assert_eq!(config.production, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_templates_accepts_string_or_list() {
        let one: ViewConfig = toml::from_str(r#"templates = "views""#).unwrap();
        assert_eq!(one.templates, vec![PathBuf::from("views")]);

        let many: ViewConfig = toml::from_str(r#"templates = ["a", "b"]"#).unwrap();
        assert_eq!(many.templates, vec![PathBuf::from("a"), PathBuf::from("b")]);

        let alias: ViewConfig = toml::from_str(r#"root = "pages""#).unwrap();
        assert_eq!(alias.templates, vec![PathBuf::from("pages")]);
    }

    #[test]
    fn test_default_context_from_toml() {
        let config: ViewConfig = toml::from_str(
            r#"
            [default_context]
            site = "Example"
            year = 2024
            "#,
        )
        .unwrap();
        assert_eq!(config.default_context.get("site"), Some(&json!("Example")));
        assert_eq!(config.default_context.get("year"), Some(&json!(2024)));
    }

    #[test]
    fn test_builder_methods() {
        let config = ViewConfig::new()
            .with_templates("views")
            .with_template_root("shared")
            .with_layout("layout")
            .with_charset("iso-8859-1")
            .with_max_cache(5)
            .with_production(true)
            .with_default_context(json!({ "a": 1 }));
        assert_eq!(config.templates.len(), 2);
        assert_eq!(config.layout.as_deref(), Some("layout"));
        assert_eq!(config.max_cache, 5);
        assert_eq!(config.production, Some(true));
        assert_eq!(config.default_context.get("a"), Some(&json!(1)));
    }

    #[test]
    fn test_validate_rejects_empty_values() {
        assert!(ViewConfig::new().with_charset(" ").validate().is_err());
        assert!(ViewConfig::new().with_view_ext(".").validate().is_err());
        let mut config = ViewConfig::new();
        config.templates.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_expanded_roots_keeps_plain_paths() {
        let config = ViewConfig::new().with_templates("plain/dir");
        assert_eq!(config.expanded_roots(), vec![PathBuf::from("plain/dir")]);
    }

    #[test]
    fn test_expanded_roots_keeps_unexpandable_root() {
        let config = ViewConfig::new().with_templates("$FOLIO_UNSET_TEMPLATE_ROOT/views");
        assert_eq!(config.expanded_roots(), vec![PathBuf::from("$FOLIO_UNSET_TEMPLATE_ROOT/views")]);
    }
}
