//! Template engine adapters.
//!
//! Every engine folio can render with is wrapped in an [`EngineAdapter`], a
//! closed set of variants that all expose the same two capabilities:
//!
//! - `compile(name, source)` turns raw template text into a [`RenderFn`] that
//!   can be called any number of times with a merged context
//! - `render(name, source, data)` renders in one step
//!
//! Engines with a real compile phase ([`TeraEngine`], [`HandlebarsEngine`])
//! parse once and the resulting [`RenderFn`] is what the compiled-template
//! cache stores. Engines without one ([`InterpolateEngine`], or a
//! [`CustomEngine`] without a compile closure) still hand back a [`RenderFn`]
//! so the cache can treat every page uniformly; that function simply renders
//! from source on every call.
//!
//! # Examples
//!
//! ```rust
//! use folio::engine::EngineAdapter;
//! use serde_json::json;
//!
//! let engine = EngineAdapter::tera();
//! let render = engine.compile("hello.html", "Hello {{ name }}!").unwrap();
//! assert_eq!(render(&json!({ "name": "World" })).unwrap(), "Hello World!");
//! ```

mod custom;
mod handlebars;
mod interpolate;
mod registry;
mod tera;

pub use custom::{CompileFn, CustomEngine, DirectRenderFn};
pub use handlebars::HandlebarsEngine;
pub use interpolate::InterpolateEngine;
pub use registry::EngineRegistry;
pub use tera::TeraEngine;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::core::{ViewError, ViewResult};

/// A compiled template: merged context in, rendered text out.
pub type RenderFn = Arc<dyn Fn(&Value) -> Result<String, EngineError> + Send + Sync>;

/// Failure reported by an engine, before the dispatcher attaches the template
/// name and turns it into a [`ViewError`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("{message}")]
    Compile {
        message: String,
        line: Option<usize>,
    },

    #[error("{message}")]
    Render {
        message: String,
        line: Option<usize>,
    },
}

impl EngineError {
    pub fn compile(message: impl Into<String>) -> Self {
        Self::Compile {
            message: message.into(),
            line: None,
        }
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
            line: None,
        }
    }

    /// Attach the template name, producing the matching [`ViewError`].
    pub fn into_view_error(self, template: &str) -> ViewError {
        match self {
            Self::Compile {
                message,
                line,
            } => ViewError::TemplateCompileError {
                template: template.to_string(),
                message,
                line,
            },
            Self::Render {
                message,
                line,
            } => ViewError::TemplateRenderError {
                template: template.to_string(),
                message,
                line,
            },
        }
    }
}

/// Built-in engines that can be named from a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    Tera,
    Handlebars,
    Interpolate,
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Tera => "tera",
            Self::Handlebars => "handlebars",
            Self::Interpolate => "interpolate",
        };
        f.write_str(name)
    }
}

/// Uniform wrapper around one concrete template engine.
#[derive(Clone)]
pub enum EngineAdapter {
    Tera(TeraEngine),
    Handlebars(HandlebarsEngine),
    Interpolate(InterpolateEngine),
    Custom(CustomEngine),
}

impl EngineAdapter {
    /// Tera with its default settings.
    #[must_use]
    pub fn tera() -> Self {
        Self::Tera(TeraEngine::new())
    }

    /// Handlebars in strict mode.
    #[must_use]
    pub fn handlebars() -> Self {
        Self::Handlebars(HandlebarsEngine::new())
    }

    /// The built-in `{{ placeholder }}` engine.
    #[must_use]
    pub fn interpolate() -> Self {
        Self::Interpolate(InterpolateEngine::new())
    }

    /// A host-supplied engine that renders in one step.
    pub fn custom<F>(name: impl Into<String>, render: F) -> Self
    where
        F: Fn(&str, &Value) -> Result<String, EngineError> + Send + Sync + 'static,
    {
        Self::Custom(CustomEngine::new(name, render))
    }

    /// Build a built-in engine from its kind and the engine-specific options
    /// table passed through from configuration.
    pub fn from_kind(kind: EngineKind, options: Option<&Value>) -> ViewResult<Self> {
        let empty = Value::Object(serde_json::Map::new());
        let options = options.unwrap_or(&empty);
        if !options.is_object() {
            return Err(ViewError::config(format!("options for the {kind} engine must be a table")));
        }

        Ok(match kind {
            EngineKind::Tera => Self::Tera(TeraEngine::from_options(options)?),
            EngineKind::Handlebars => Self::Handlebars(HandlebarsEngine::from_options(options)?),
            EngineKind::Interpolate => Self::Interpolate(InterpolateEngine::new()),
        })
    }

    /// Engine identifier, used in logs and error messages.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Tera(_) => "tera",
            Self::Handlebars(_) => "handlebars",
            Self::Interpolate(_) => "interpolate",
            Self::Custom(engine) => engine.name(),
        }
    }

    /// Whether the engine parses templates ahead of rendering.
    #[must_use]
    pub fn supports_compile(&self) -> bool {
        match self {
            Self::Tera(_) | Self::Handlebars(_) => true,
            Self::Interpolate(_) => false,
            Self::Custom(engine) => engine.supports_compile(),
        }
    }

    /// Compile `source` into a reusable [`RenderFn`].
    ///
    /// `name` identifies the template inside the engine (Tera, for instance,
    /// decides whether to autoescape from its suffix).
    pub fn compile(&self, name: &str, source: &str) -> Result<RenderFn, EngineError> {
        match self {
            Self::Tera(engine) => engine.compile(name, source),
            Self::Handlebars(engine) => engine.compile(name, source),
            Self::Interpolate(engine) => Ok(engine.render_fn(source)),
            Self::Custom(engine) => engine.compile(source),
        }
    }

    /// Render `source` with `data` in one step.
    pub fn render(&self, name: &str, source: &str, data: &Value) -> Result<String, EngineError> {
        match self {
            Self::Interpolate(engine) => engine.render(source, data),
            Self::Custom(engine) => engine.render(source, data),
            Self::Tera(_) | Self::Handlebars(_) => {
                let render = self.compile(name, source)?;
                render(data)
            }
        }
    }
}

impl fmt::Debug for EngineAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EngineAdapter").field(&self.name()).finish()
    }
}

/// Read an optional boolean engine option.
pub(crate) fn bool_option(options: &Value, engine: &str, key: &str) -> ViewResult<Option<bool>> {
    match options.get(key) {
        None => Ok(None),
        Some(Value::Bool(value)) => Ok(Some(*value)),
        Some(other) => Err(ViewError::config(format!(
            "option '{key}' for the {engine} engine must be a boolean, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_compile_and_render_agree() {
        let data = json!({ "text": "hello" });
        for engine in
            [EngineAdapter::tera(), EngineAdapter::handlebars(), EngineAdapter::interpolate()]
        {
            let compiled = engine.compile("page.html", "<p>{{ text }}</p>").unwrap();
            let direct = engine.render("page.html", "<p>{{ text }}</p>", &data).unwrap();
            assert_eq!(compiled(&data).unwrap(), direct, "engine {}", engine.name());
            assert_eq!(direct, "<p>hello</p>");
        }
    }

    #[test]
    fn test_supports_compile() {
        assert!(EngineAdapter::tera().supports_compile());
        assert!(EngineAdapter::handlebars().supports_compile());
        assert!(!EngineAdapter::interpolate().supports_compile());
        let custom = EngineAdapter::custom("upper", |src, _| Ok(src.to_uppercase()));
        assert!(!custom.supports_compile());
    }

    #[test]
    fn test_from_kind_rejects_non_table_options() {
        let err = EngineAdapter::from_kind(EngineKind::Tera, Some(&json!(true))).unwrap_err();
        assert!(matches!(err, ViewError::Config { .. }));
    }

    #[test]
    fn test_from_kind_builds_named_engine() {
        let engine = EngineAdapter::from_kind(EngineKind::Handlebars, None).unwrap();
        assert_eq!(engine.name(), "handlebars");
        assert_eq!(EngineKind::Interpolate.to_string(), "interpolate");
    }

    #[test]
    fn test_engine_error_into_view_error() {
        let err = EngineError::Render {
            message: "Variable `x` not found".into(),
            line: Some(2),
        }
        .into_view_error("index.html");
        match err {
            ViewError::TemplateRenderError {
                template,
                line,
                ..
            } => {
                assert_eq!(template, "index.html");
                assert_eq!(line, Some(2));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
