//! Integration test suite for folio
//!
//! End-to-end tests against real template trees on disk and the `folio`
//! binary.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **render**: Library rendering through the filesystem storage
//! - **cli_render**: The `folio render` command
//! - **cli_check**: The `folio check` command

#[path = "../common/mod.rs"]
mod common;

mod cli_check;
mod cli_render;
mod render;
