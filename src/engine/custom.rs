//! Host-supplied engines.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use super::{EngineError, RenderFn};

/// Direct `render(source, data)` capability of a custom engine.
pub type DirectRenderFn = Arc<dyn Fn(&str, &Value) -> Result<String, EngineError> + Send + Sync>;

/// Optional `compile(source)` capability of a custom engine.
pub type CompileFn = Arc<dyn Fn(&str) -> Result<RenderFn, EngineError> + Send + Sync>;

/// An engine defined by closures instead of one of the built-in crates.
///
/// `render` is required. When `compile` is present the engine behaves like a
/// compiling engine; otherwise compiled pages fall back to calling `render`
/// with the stored source on every request.
#[derive(Clone)]
pub struct CustomEngine {
    name: String,
    render: DirectRenderFn,
    compile: Option<CompileFn>,
}

impl CustomEngine {
    pub fn new<F>(name: impl Into<String>, render: F) -> Self
    where
        F: Fn(&str, &Value) -> Result<String, EngineError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            render: Arc::new(render),
            compile: None,
        }
    }

    /// Add a compile phase.
    #[must_use]
    pub fn with_compile<F>(mut self, compile: F) -> Self
    where
        F: Fn(&str) -> Result<RenderFn, EngineError> + Send + Sync + 'static,
    {
        self.compile = Some(Arc::new(compile));
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn supports_compile(&self) -> bool {
        self.compile.is_some()
    }

    pub fn compile(&self, source: &str) -> Result<RenderFn, EngineError> {
        if let Some(compile) = &self.compile {
            return compile(source);
        }

        let render = Arc::clone(&self.render);
        let source: Arc<str> = Arc::from(source);
        Ok(Arc::new(move |data: &Value| render(&source, data)))
    }

    pub fn render(&self, source: &str, data: &Value) -> Result<String, EngineError> {
        (self.render)(source, data)
    }
}

impl fmt::Debug for CustomEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomEngine")
            .field("name", &self.name)
            .field("compile", &self.compile.is_some())
            .finish()
    }
}
