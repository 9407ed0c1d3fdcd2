//! Folio CLI entry point
//!
//! Parses arguments, runs the selected command and prints failures with
//! context and suggestions:
//! - `render` - Render a page to stdout or a file
//! - `check` - Compile every template under the template roots

use anyhow::Result;
use clap::Parser;
use folio::cli;
use folio::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
