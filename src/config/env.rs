//! Environment access for production-mode detection.
//!
//! The dispatcher never inspects the process environment directly; it asks an
//! [`EnvReader`] once, at build time. Tests and embedders can inject a
//! [`StaticEnv`] to control the outcome without touching global state.

use std::collections::HashMap;

use crate::constants::{PRODUCTION_ENV_VALUE, PRODUCTION_ENV_VAR};

/// Read-only view of environment variables.
pub trait EnvReader: Send + Sync {
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvReader for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Fixed set of variables.
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    vars: HashMap<String, String>,
}

impl StaticEnv {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// An environment that selects production mode.
    #[must_use]
    pub fn production() -> Self {
        Self::new().with(PRODUCTION_ENV_VAR, PRODUCTION_ENV_VALUE)
    }
}

impl EnvReader for StaticEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Decide whether the cache is trusted for reads.
pub fn production_mode(explicit: Option<bool>, env: &dyn EnvReader) -> bool {
    explicit.unwrap_or_else(|| {
        env.var(PRODUCTION_ENV_VAR).is_some_and(|value| value.trim() == PRODUCTION_ENV_VALUE)
    })
}
