//! Command-line host for folio.
//!
//! The `folio` binary drives the render dispatcher from a shell, mainly to
//! preview pages and to validate a template tree before deploying it.
//!
//! # Commands
//!
//! - `render` - Render one page to stdout or a file
//! - `check` - Compile every template under the template roots
//!
//! # Global Options
//!
//! - `--config` - Path to `folio.toml` (default: `./folio.toml`, optional)
//! - `--templates` - Template root(s), replacing the configured ones
//! - `--production` - Trust the compiled-template cache
//! - `--verbose` - Enable debug output
//! - `--quiet` - Suppress all output except errors
//!
//! # Examples
//!
//! ```bash
//! folio render index --data page.json
//! folio render emails/welcome --set user.name=Ada --no-layout
//! folio --config site/folio.toml check
//! ```

mod check;
mod common;
mod render;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub use check::CheckCommand;
pub use common::EngineSettings;
pub use render::RenderCommand;

/// Main CLI application structure for folio.
#[derive(Parser, Debug)]
#[command(
    name = "folio",
    about = "Render server-side views from the command line",
    version,
    long_about = "folio resolves page names to templates, compiles them with the configured engines and renders them with JSON data."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output for debugging.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors and rendered pages.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the configuration file.
    ///
    /// Defaults to `folio.toml` in the current directory; a missing default
    /// file means built-in defaults. An explicitly given file must exist.
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Template root directory. Repeat to search several roots in order.
    #[arg(short, long, global = true, value_name = "DIR")]
    templates: Vec<PathBuf>,

    /// Render in production mode, compiling each template once.
    #[arg(long, global = true)]
    production: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a page.
    Render(RenderCommand),

    /// Compile every template and report failures.
    Check(CheckCommand),
}

impl Cli {
    /// Execute the parsed command.
    pub async fn execute(self) -> Result<()> {
        self.init_logging();

        let settings = EngineSettings {
            config_path: self.config,
            templates: self.templates,
            production: self.production,
        };

        match self.command {
            Commands::Render(cmd) => cmd.execute(&settings).await,
            Commands::Check(cmd) => cmd.execute(&settings, self.quiet).await,
        }
    }

    /// Log filter for the verbosity flags. `RUST_LOG` applies when neither
    /// flag is given.
    fn log_filter(&self) -> EnvFilter {
        if self.verbose {
            EnvFilter::new("folio=debug")
        } else if self.quiet {
            EnvFilter::new("off")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
        }
    }

    fn init_logging(&self) {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(self.log_filter())
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}
