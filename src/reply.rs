//! Host reply contract.

use serde_json::{Map, Value};

/// The parts of a host's response object the dispatcher needs.
///
/// [`ViewEngine::view`](crate::view::ViewEngine::view) reads the reply's
/// locals, sets the content type when the host has not, and sends the
/// rendered body. Nothing is written to the reply when rendering fails.
pub trait Reply {
    fn content_type(&self) -> Option<&str>;

    fn set_content_type(&mut self, value: String);

    /// Per-request render data, merged between the defaults and call data.
    fn locals(&self) -> Option<&Map<String, Value>>;

    fn send(&mut self, body: String);
}

/// In-memory [`Reply`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BufferedReply {
    content_type: Option<String>,
    locals: Option<Map<String, Value>>,
    body: Option<String>,
}

impl BufferedReply {
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
    pub fn with_content_type(mut self, value: impl Into<String>) -> Self {
        self.content_type = Some(value.into());
        self
    }

    /// Locals map, created on first use.
    pub fn locals_mut(&mut self) -> &mut Map<String, Value> {
        self.locals.get_or_insert_with(Map::new)
    }

    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    #[must_use]
    pub fn is_sent(&self) -> bool {
        self.body.is_some()
    }

    #[must_use]
    pub fn into_body(self) -> Option<String> {
        self.body
    }
}

impl Reply for BufferedReply {
    fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    fn set_content_type(&mut self, value: String) {
        self.content_type = Some(value);
    }

    fn locals(&self) -> Option<&Map<String, Value>> {
        self.locals.as_ref()
    }

    fn send(&mut self, body: String) {
        self.body = Some(body);
    }
}
