//! Compiled views as stored in the cache.

use serde_json::Value;
use std::fmt;

use crate::constants::LAYOUT_BODY_KEY;
use crate::context::MergedContext;
use crate::core::ViewResult;
use crate::engine::RenderFn;
use crate::resolver::PageKey;

/// One compiled template and the key used to report its errors.
#[derive(Clone)]
pub(crate) struct CompiledTemplate {
    pub(crate) key: PageKey,
    pub(crate) render: RenderFn,
}

impl CompiledTemplate {
    pub(crate) fn render(&self, context: &Value) -> ViewResult<String> {
        (self.render)(context).map_err(|e| e.into_view_error(self.key.as_str()))
    }
}

impl fmt::Debug for CompiledTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledTemplate").field("key", &self.key).finish_non_exhaustive()
    }
}

/// A page and, optionally, the layout it is embedded in.
#[derive(Debug, Clone)]
pub(crate) struct CompiledView {
    pub(crate) page: CompiledTemplate,
    pub(crate) layout: Option<CompiledTemplate>,
}

impl CompiledView {
    /// Render the page, then the layout with the page output under `body`.
    pub(crate) fn render(&self, context: MergedContext) -> ViewResult<String> {
        let mut context = Value::Object(context);
        let body = self.page.render(&context)?;

        let Some(layout) = &self.layout else {
            return Ok(body);
        };

        if let Value::Object(map) = &mut context {
            map.insert(LAYOUT_BODY_KEY.to_string(), Value::String(body));
        }
        layout.render(&context)
    }
}
