//! Template storage.
//!
//! The dispatcher reads template sources through [`TemplateStorage`] so hosts
//! can serve templates from somewhere other than the local filesystem.
//! [`FsStorage`] is the default.

use std::future::Future;
use std::io;
use std::path::Path;

use tokio::fs;

/// Read-only access to template sources.
///
/// A missing template must be reported as [`io::ErrorKind::NotFound`]; the
/// dispatcher moves on to the next template root only for that kind.
pub trait TemplateStorage: Send + Sync {
    fn read_to_string(&self, path: &Path) -> impl Future<Output = io::Result<String>> + Send;
}

/// Reads templates from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStorage;

impl TemplateStorage for FsStorage {
    fn read_to_string(&self, path: &Path) -> impl Future<Output = io::Result<String>> + Send {
        fs::read_to_string(path)
    }
}
