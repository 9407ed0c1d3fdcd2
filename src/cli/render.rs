//! `folio render`: render one page.

use anyhow::{Context, Result, anyhow, bail};
use clap::Args;
use serde_json::{Map, Value};
use std::path::PathBuf;
use tokio::fs;

use super::common::EngineSettings;
use crate::view::RenderOptions;

/// Render a page with JSON data.
#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Page to render, e.g. `index` or `blog/post.html`.
    #[arg(value_name = "PAGE")]
    pub page: String,

    /// JSON file with the render data.
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Set one value, applied on top of `--data`. Dotted keys create nested
    /// objects; values are parsed as JSON and fall back to plain strings.
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Layout to use instead of the configured one.
    #[arg(long, value_name = "NAME", conflicts_with = "no_layout")]
    pub layout: Option<String>,

    /// Render without any layout.
    #[arg(long)]
    pub no_layout: bool,

    /// Write the output to a file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl RenderCommand {
    pub async fn execute(self, settings: &EngineSettings) -> Result<()> {
        let config = settings.load_config().await?;
        let engine = EngineSettings::build_engine(&config)?;

        let data = self.render_data().await?;
        let options = self.render_options();

        let html = engine.render_with(&self.page, &data, &options).await?;

        match &self.output {
            Some(path) => {
                fs::write(path, &html)
                    .await
                    .with_context(|| format!("Failed to write output to {}", path.display()))?;
                tracing::info!("Wrote {} bytes to {}", html.len(), path.display());
            }
            None => print!("{html}"),
        }
        Ok(())
    }

    pub(crate) fn render_options(&self) -> RenderOptions {
        let options = RenderOptions::new();
        if self.no_layout {
            options.without_layout()
        } else if let Some(layout) = &self.layout {
            options.with_layout(layout)
        } else {
            options
        }
    }

    async fn render_data(&self) -> Result<Value> {
        let mut data = match &self.data {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read data from {}", path.display()))?;
                serde_json::from_str(&content)
                    .with_context(|| format!("Failed to parse data from {}", path.display()))?
            }
            None => Value::Null,
        };

        if self.set.is_empty() {
            return Ok(data);
        }

        if data.is_null() {
            data = Value::Object(Map::new());
        }
        let Value::Object(map) = &mut data else {
            bail!("--set requires the data file to contain a JSON object");
        };
        for assignment in &self.set {
            apply_assignment(map, assignment)?;
        }
        Ok(data)
    }
}

/// Apply one `key=value` assignment. `a.b=1` sets `{"a": {"b": 1}}`,
/// replacing any non-object found along the way.
pub(crate) fn apply_assignment(map: &mut Map<String, Value>, assignment: &str) -> Result<()> {
    let (key, raw) = assignment
        .split_once('=')
        .ok_or_else(|| anyhow!("Invalid --set '{assignment}', expected KEY=VALUE"))?;

    let segments: Vec<&str> = key.split('.').map(str::trim).collect();
    if segments.iter().any(|s| s.is_empty()) {
        bail!("Invalid --set key '{key}'");
    }

    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));

    let (last, parents) = segments.split_last().ok_or_else(|| anyhow!("Invalid --set key '{key}'"))?;
    let mut current = map;
    for segment in parents {
        let slot = current.entry((*segment).to_string()).or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        current = match slot {
            Value::Object(inner) => inner,
            _ => bail!("Invalid --set key '{key}'"),
        };
    }
    current.insert((*last).to_string(), value);
    Ok(())
}
