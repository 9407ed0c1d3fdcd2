//! Extension-keyed registry of engine adapters.

use std::collections::BTreeMap;

use super::EngineAdapter;

/// Maps file extensions to the engine that renders them.
///
/// Built once at configuration time and read-only afterwards. Extensions are
/// stored without a leading dot and compared case-sensitively.
#[derive(Debug, Clone, Default)]
pub struct EngineRegistry {
    engines: BTreeMap<String, EngineAdapter>,
}

impl EngineRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `engine` for `extension`, replacing any previous entry.
    pub fn register(&mut self, extension: impl AsRef<str>, engine: EngineAdapter) {
        let extension = normalize_extension(extension.as_ref());
        tracing::debug!("Registering {} engine for '.{}'", engine.name(), extension);
        self.engines.insert(extension, engine);
    }

    #[must_use]
    pub fn get(&self, extension: &str) -> Option<&EngineAdapter> {
        self.engines.get(normalize_extension(extension).as_str())
    }

    #[must_use]
    pub fn contains(&self, extension: &str) -> bool {
        self.get(extension).is_some()
    }

    /// Registered extensions in sorted order.
    #[must_use]
    pub fn extensions(&self) -> Vec<String> {
        self.engines.keys().cloned().collect()
    }

    /// The single registered extension, when exactly one engine exists.
    #[must_use]
    pub fn sole_extension(&self) -> Option<&str> {
        if self.engines.len() == 1 {
            self.engines.keys().next().map(String::as_str)
        } else {
            None
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.engines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }
}

fn normalize_extension(extension: &str) -> String {
    extension.trim_start_matches('.').to_string()
}
