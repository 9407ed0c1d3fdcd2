//! Test utilities for folio
//!
//! Helpers shared by unit tests, integration tests and downstream crates
//! (behind the `test-utils` feature):
//! - [`init_test_logging`] wires `tracing` output into the test harness
//! - [`MemoryStorage`] serves templates from memory and counts reads, so tests
//!   can observe whether the dispatcher hit storage
//! - [`fixtures`] holds small template sources used across test suites
//!
//! # Example
//!
//! ```rust,no_run
//! use folio::test_utils::MemoryStorage;
//!
//! let storage = MemoryStorage::new().with_template("views/index.html", "<h1>{{ title }}</h1>");
//! assert_eq!(storage.reads("views/index.html"), 0);
//! ```

pub mod fixtures;

use std::collections::HashMap;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, Once, PoisonError};
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::storage::TemplateStorage;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=folio=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}

#[derive(Debug, Default)]
struct MemoryState {
    files: HashMap<PathBuf, String>,
    reads: HashMap<PathBuf, usize>,
}

/// In-memory [`TemplateStorage`] that records every read.
///
/// Clones share the same files and counters, so a test can keep one handle
/// while the engine owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    state: Arc<Mutex<MemoryState>>,
    latency: Option<Duration>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_template(self, path: impl Into<PathBuf>, source: impl Into<String>) -> Self {
        self.insert(path, source);
        self
    }

    /// Delay every read, so concurrent renders overlap.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Add or replace a template.
    pub fn insert(&self, path: impl Into<PathBuf>, source: impl Into<String>) {
        self.lock().files.insert(path.into(), source.into());
    }

    pub fn remove(&self, path: impl AsRef<Path>) {
        self.lock().files.remove(path.as_ref());
    }

    /// Number of reads of `path`, found or not.
    #[must_use]
    pub fn reads(&self, path: impl AsRef<Path>) -> usize {
        self.lock().reads.get(path.as_ref()).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total_reads(&self) -> usize {
        self.lock().reads.values().sum()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TemplateStorage for MemoryStorage {
    fn read_to_string(&self, path: &Path) -> impl Future<Output = io::Result<String>> + Send {
        let result = {
            let mut state = self.lock();
            *state.reads.entry(path.to_path_buf()).or_insert(0) += 1;
            state.files.get(path).cloned().ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path.display()))
            })
        };
        let latency = self.latency;

        async move {
            if let Some(latency) = latency {
                tokio::time::sleep(latency).await;
            }
            result
        }
    }
}
