//! Handlebars engine adapter.

use ::handlebars::Handlebars;
use regex::Regex;
use serde_json::Value;
use std::sync::Arc;

use super::{EngineError, RenderFn, bool_option};
use crate::core::ViewResult;

/// Adapter around the [handlebars](https://docs.rs/handlebars) engine.
///
/// Strict mode is on by default so that a variable missing from the render
/// data is a render error rather than an empty string.
#[derive(Debug, Clone)]
pub struct HandlebarsEngine {
    strict_mode: bool,
}

impl Default for HandlebarsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl HandlebarsEngine {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            strict_mode: true,
        }
    }

    #[must_use]
    pub const fn with_strict_mode(mut self, strict_mode: bool) -> Self {
        self.strict_mode = strict_mode;
        self
    }

    /// Recognized options: `strict_mode` (bool, default `true`).
    pub(crate) fn from_options(options: &Value) -> ViewResult<Self> {
        let strict = bool_option(options, "handlebars", "strict_mode")?.unwrap_or(true);
        Ok(Self::new().with_strict_mode(strict))
    }

    pub fn compile(&self, name: &str, source: &str) -> Result<RenderFn, EngineError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(self.strict_mode);

        registry.register_template_string(name, source).map_err(|e| {
            let message = e.to_string();
            EngineError::Compile {
                line: extract_line(&message),
                message,
            }
        })?;

        tracing::trace!("Compiled Handlebars template '{}'", name);

        let registry = Arc::new(registry);
        let name = name.to_string();
        Ok(Arc::new(move |data: &Value| {
            registry.render(&name, data).map_err(|e| {
                let message = e.to_string();
                EngineError::Render {
                    line: extract_line(&message),
                    message,
                }
            })
        }))
    }
}

/// Handlebars reports positions as "line 3, col 7".
fn extract_line(message: &str) -> Option<usize> {
    let re = Regex::new(r"line (\d+)").ok()?;
    let caps = re.captures(message)?;
    caps.get(1)?.as_str().parse::<usize>().ok()
}
