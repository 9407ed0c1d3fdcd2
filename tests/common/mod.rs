//! Common test utilities for folio integration tests
//!
//! A [`TestProject`] is a temporary directory holding a template tree and an
//! optional `folio.toml`, with helpers to run the `folio` binary inside it.

// Not every suite uses every helper.
#![allow(dead_code)]

use anyhow::{Context, Result};
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: TempDir::new().context("Failed to create temp dir")?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of the `templates` root.
    pub fn templates_dir(&self) -> PathBuf {
        self.path().join("templates")
    }

    /// Write `content` to `templates/<name>`, creating parent directories.
    pub fn template(&self, name: &str, content: &str) -> Result<&Self> {
        self.file(&format!("templates/{name}"), content)
    }

    pub fn file(&self, relative: &str, content: &str) -> Result<&Self> {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(self)
    }

    pub fn config(&self, content: &str) -> Result<&Self> {
        self.file("folio.toml", content)
    }

    pub fn read(&self, relative: &str) -> Result<String> {
        let path = self.path().join(relative);
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
    }

    /// `folio` command running in the project directory.
    pub fn folio(&self) -> Command {
        let mut cmd = Command::cargo_bin("folio").expect("folio binary is built for tests");
        cmd.current_dir(self.path()).env_remove("RUST_LOG").env_remove("FOLIO_ENV");
        cmd
    }
}
