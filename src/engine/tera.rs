//! Tera engine adapter.
//!
//! Each compiled page gets its own private `Tera` instance holding exactly one
//! template, so compiled pages never see each other's templates and a failed
//! compile leaves nothing behind.

use ::tera::{Context as TeraContext, Tera};
use regex::Regex;
use serde_json::Value;
use std::sync::Arc;

use super::{EngineError, RenderFn, bool_option};
use crate::core::ViewResult;

/// Adapter around the [Tera](https://keats.github.io/tera/) engine.
#[derive(Debug, Clone, Default)]
pub struct TeraEngine {
    /// Suffixes to autoescape. `None` keeps Tera's defaults
    /// (`.html`, `.htm`, `.xml`).
    autoescape: Option<Vec<&'static str>>,
}

impl TeraEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Autoescape only templates whose name ends with one of `suffixes`.
    /// An empty list disables autoescaping.
    #[must_use]
    pub fn with_autoescape(mut self, suffixes: Vec<&'static str>) -> Self {
        self.autoescape = Some(suffixes);
        self
    }

    /// Recognized options: `autoescape` (bool). `false` turns escaping off
    /// entirely; `true` keeps Tera's defaults.
    pub(crate) fn from_options(options: &Value) -> ViewResult<Self> {
        let engine = match bool_option(options, "tera", "autoescape")? {
            Some(false) => Self::new().with_autoescape(Vec::new()),
            Some(true) | None => Self::new(),
        };
        Ok(engine)
    }

    pub fn compile(&self, name: &str, source: &str) -> Result<RenderFn, EngineError> {
        let mut tera = Tera::default();
        if let Some(suffixes) = &self.autoescape {
            tera.autoescape_on(suffixes.clone());
        }

        tera.add_raw_template(name, source).map_err(|e| EngineError::Compile {
            message: format_tera_error(&e, name),
            line: extract_line(&e),
        })?;

        tracing::trace!("Compiled Tera template '{}'", name);

        let tera = Arc::new(tera);
        let name = name.to_string();
        Ok(Arc::new(move |data: &Value| {
            let context = TeraContext::from_value(data.clone())
                .map_err(|e| EngineError::render(format_tera_error(&e, &name)))?;
            tera.render(&name, &context).map_err(|e| EngineError::Render {
                message: format_tera_error(&e, &name),
                line: extract_line(&e),
            })
        }))
    }
}

/// Flatten a Tera error chain into one readable message.
///
/// Tera wraps the useful part ("Variable `x` not found ...") in generic
/// "Failed to render 'name'" layers; those are dropped when something more
/// specific is available.
fn format_tera_error(error: &::tera::Error, name: &str) -> String {
    use std::error::Error;

    let generic = [format!("Failed to render '{name}'"), format!("Failed to parse '{name}'")];

    let mut all_messages = vec![error.to_string()];
    let mut current: Option<&dyn Error> = error.source();
    while let Some(err) = current {
        all_messages.push(err.to_string());
        current = err.source();
    }

    let messages: Vec<String> = all_messages
        .iter()
        .map(|msg| msg.trim().to_string())
        .filter(|msg| !msg.is_empty() && !generic.contains(msg))
        .collect();

    if messages.is_empty() {
        all_messages.join(": ")
    } else {
        messages.join(": ")
    }
}

/// Pull the 1-based line number out of a Tera parse error (`--> 3:7`).
fn extract_line(error: &::tera::Error) -> Option<usize> {
    use std::error::Error;

    let mut text = error.to_string();
    let mut current: Option<&dyn Error> = error.source();
    while let Some(err) = current {
        text.push('\n');
        text.push_str(&err.to_string());
        current = err.source();
    }

    let re = Regex::new(r"-->\s*(\d+):(\d+)").ok()?;
    let caps = re.captures(&text)?;
    caps.get(1)?.as_str().parse::<usize>().ok()
}
