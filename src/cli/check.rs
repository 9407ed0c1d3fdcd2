//! `folio check`: compile every template.

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use futures::future::join_all;
use std::collections::BTreeSet;
use std::path::Path;
use walkdir::WalkDir;

use super::common::EngineSettings;

/// Compile every template with a registered extension under the template
/// roots, with the configured layout applied.
#[derive(Args, Debug)]
pub struct CheckCommand {
    /// Check only these pages instead of walking the template roots.
    #[arg(value_name = "PAGE")]
    pub pages: Vec<String>,
}

impl CheckCommand {
    pub async fn execute(self, settings: &EngineSettings, quiet: bool) -> Result<()> {
        let config = settings.load_config().await?;
        let engine = EngineSettings::build_engine(&config)?;

        let pages = if self.pages.is_empty() {
            let mut found = BTreeSet::new();
            for root in engine.resolver().roots() {
                found.extend(discover_pages(root, engine.resolver().extensions()));
            }
            found.into_iter().collect()
        } else {
            self.pages
        };

        if pages.is_empty() {
            if !quiet {
                println!("⚠ No templates found");
            }
            return Ok(());
        }

        let results = join_all(pages.iter().map(|page| engine.compile_page(page))).await;

        let mut failures = 0;
        for (page, result) in pages.iter().zip(results) {
            match result {
                Ok(_) => {
                    if !quiet {
                        println!("{} {}", "✓".green(), page);
                    }
                }
                Err(e) => {
                    failures += 1;
                    println!("{} {}: {}", "✗".red(), page, e);
                }
            }
        }

        if failures > 0 {
            bail!("{} of {} template(s) failed to compile", failures, pages.len());
        }

        if !quiet {
            println!("✓ All {} templates compiled successfully", pages.len());
        }
        Ok(())
    }
}

/// Page names (root-relative, `/`-separated) of files under `root` whose
/// extension has an engine. A missing root yields nothing.
pub(crate) fn discover_pages(root: &Path, extensions: &[String]) -> Vec<String> {
    WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!("Skipping unreadable entry under {}: {}", root.display(), e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| extensions.iter().any(|known| known == ext))
        })
        .filter_map(|entry| {
            let relative = entry.path().strip_prefix(root).ok()?;
            let segments: Vec<String> =
                relative.components().map(|c| c.as_os_str().to_string_lossy().into_owned()).collect();
            Some(segments.join("/"))
        })
        .collect()
}
