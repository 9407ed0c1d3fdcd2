//! Global constants used throughout the folio codebase.
//!
//! Defaults for the view configuration and the handful of well-known names
//! shared between the resolver, the dispatcher and the CLI live here so the
//! values stay discoverable in one place.

/// Default capacity of the compiled-template cache.
pub const DEFAULT_MAX_CACHE: usize = 100;

/// Charset used for the `Content-Type` header when none is configured.
pub const DEFAULT_CHARSET: &str = "utf-8";

/// Template root used when the configuration does not list any.
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";

/// Environment variable consulted when `production` is not set explicitly.
pub const PRODUCTION_ENV_VAR: &str = "FOLIO_ENV";

/// Value of [`PRODUCTION_ENV_VAR`] that enables production mode.
pub const PRODUCTION_ENV_VALUE: &str = "production";

/// Context key under which a page's rendered output is handed to its layout.
pub const LAYOUT_BODY_KEY: &str = "body";

/// Engine extension used as the default engine when a configuration file
/// does not declare an `[engines]` table.
pub const DEFAULT_ENGINE_EXTENSION: &str = "html";

/// Default configuration file looked up by the CLI.
pub const DEFAULT_CONFIG_FILE: &str = "folio.toml";

/// Maximum number of "did you mean" suggestions shown for a misspelled name.
pub const MAX_SUGGESTIONS: usize = 3;

/// Maximum Levenshtein distance, as a percentage of the target length, for a
/// name to count as a suggestion.
pub const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Build the `Content-Type` header value for rendered HTML.
pub fn html_content_type(charset: &str) -> String {
    format!("text/html; charset={charset}")
}
