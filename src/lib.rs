//! Folio - server-side view rendering
//!
//! Folio turns a page name plus render data into a rendered body. It sits
//! between a host (a web framework, a static site generator, the bundled
//! `folio` CLI) and one or more template engines.
//!
//! # Architecture Overview
//!
//! A render call flows through five parts:
//! - the [`resolver`] maps a page name to a canonical key, an engine and the
//!   storage paths to try
//! - the [`engine`] adapters give every template engine the same
//!   compile/render shape
//! - the [`cache`] keeps compiled templates, bounded and least-recently-used
//! - the [`context`] merger layers default context, locals and call data
//! - the [`view`] dispatcher ties them together and talks to the host through
//!   [`reply::Reply`]
//!
//! ## Key Features
//!
//! - **Pluggable engines**: Tera, Handlebars, a built-in placeholder engine
//!   and host-supplied closures, selected by file extension
//! - **Production cache**: templates are read and compiled once per key, with
//!   concurrent misses coalesced
//! - **Layouts**: a page can be embedded in a layout template as `body`
//! - **Multiple roots**: template directories are searched in order
//!
//! # Modules
//!
//! - [`cache`] - Compiled-template LRU cache and statistics
//! - [`cli`] - The `folio` command-line host
//! - [`config`] - View options, `folio.toml` loading and production detection
//! - [`constants`] - Defaults shared across modules
//! - [`context`] - Render context merging
//! - [`core`] - Error types and user-facing error reporting
//! - [`engine`] - Engine adapters and the extension registry
//! - [`reply`] - Host reply contract
//! - [`resolver`] - Page name resolution and normalization
//! - [`storage`] - Template storage abstraction
//! - [`view`] - The render dispatcher
//!
//! # Configuration (folio.toml)
//!
//! ```toml
//! templates = ["views", "~/shared/views"]
//! layout = "layout"
//! max_cache = 200
//!
//! [engines]
//! html = "tera"
//! hbs = "handlebars"
//!
//! [options.hbs]
//! strict_mode = true
//!
//! [default_context]
//! site = "Example"
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use folio::config::ViewConfig;
//! use folio::engine::EngineAdapter;
//! use folio::reply::{BufferedReply, Reply};
//! use folio::view::ViewEngine;
//! use serde_json::json;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let engine = ViewEngine::builder(ViewConfig::new().with_layout("layout"))
//!     .engine("html", EngineAdapter::tera())
//!     .build()?;
//!
//! let mut reply = BufferedReply::new();
//! engine.view(&mut reply, "index", &json!({ "title": "Home" })).await?;
//! assert_eq!(reply.content_type(), Some("text/html; charset=utf-8"));
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod constants;
pub mod context;
pub mod core;
pub mod engine;
pub mod reply;
pub mod resolver;
pub mod storage;
pub mod view;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
