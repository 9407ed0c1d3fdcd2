//! Built-in placeholder engine.
//!
//! A deliberately small engine with no compile phase: `{{ path }}` is replaced
//! by the HTML-escaped value found at `path` in the render data and
//! `{{{ path }}}` by the raw value. Paths are dot-separated; numeric segments
//! index into arrays. A placeholder whose value is missing fails the render.

use regex::Regex;
use serde_json::Value;
use std::sync::{Arc, LazyLock};

use super::{EngineError, RenderFn};

static PLACEHOLDER: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| {
    Regex::new(
        r"\{\{\{\s*([A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z0-9_]+)*)\s*\}\}\}|\{\{\s*([A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z0-9_]+)*)\s*\}\}",
    )
});

/// Render-per-call `{{ placeholder }}` engine.
#[derive(Debug, Clone, Default)]
pub struct InterpolateEngine;

impl InterpolateEngine {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Wrap `source` in a [`RenderFn`] that interpolates on every call.
    pub fn render_fn(&self, source: &str) -> RenderFn {
        let engine = self.clone();
        let source: Arc<str> = Arc::from(source);
        Arc::new(move |data: &Value| engine.render(&source, data))
    }

    pub fn render(&self, source: &str, data: &Value) -> Result<String, EngineError> {
        let pattern = PLACEHOLDER.as_ref().map_err(|e| EngineError::render(e.to_string()))?;

        let mut output = String::with_capacity(source.len());
        let mut last = 0;

        for caps in pattern.captures_iter(source) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let (path, raw) = match (caps.get(1), caps.get(2)) {
                (Some(raw_path), _) => (raw_path.as_str(), true),
                (None, Some(path)) => (path.as_str(), false),
                (None, None) => continue,
            };

            let value = lookup(data, path).ok_or_else(|| EngineError::Render {
                message: format!("Variable `{path}` not found in render data"),
                line: Some(line_of(source, whole.start())),
            })?;

            output.push_str(&source[last..whole.start()]);
            let text = value_to_text(value);
            if raw {
                output.push_str(&text);
            } else {
                output.push_str(&::tera::escape_html(&text));
            }
            last = whole.end();
        }

        output.push_str(&source[last..]);
        Ok(output)
    }
}

fn lookup<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(data, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|idx| items.get(idx)),
        _ => None,
    })
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn line_of(source: &str, offset: usize) -> usize {
    source[..offset].matches('\n').count() + 1
}
