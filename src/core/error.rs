//! Error handling for folio
//!
//! This module provides the error type returned by every render call and the
//! user-facing reporting used by the CLI. The error system follows two rules:
//! 1. **Strongly-typed errors** so hosts can branch on the failure kind
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Error Categories
//!
//! - **Request errors**: [`ViewError::MissingPage`], [`ViewError::InvalidContext`]
//! - **Resolution errors**: [`ViewError::UnknownEngine`], [`ViewError::ResolutionError`]
//! - **Storage errors**: [`ViewError::TemplateNotFound`], [`ViewError::LayoutNotFound`]
//! - **Engine errors**: [`ViewError::TemplateCompileError`], [`ViewError::TemplateRenderError`]
//! - **Configuration errors**: [`ViewError::Config`]
//!
//! Every error is local to one render call. None of them is retried: rendering
//! is deterministic for a given template and context, so a retry with the same
//! inputs reproduces the same failure.
//!
//! # Examples
//!
//! ```rust,no_run
//! use folio::core::{ViewError, user_friendly_error};
//!
//! let err = ViewError::MissingPage;
//! let ctx = user_friendly_error(anyhow::Error::from(err));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use strsim::levenshtein;
use thiserror::Error;

use crate::constants::{MAX_SUGGESTIONS, SIMILARITY_THRESHOLD_PERCENT};

/// Result alias used across the crate.
pub type ViewResult<T> = Result<T, ViewError>;

/// Errors produced while resolving, loading, compiling or rendering a view.
#[derive(Error, Debug)]
pub enum ViewError {
    #[error("No page was given to render")]
    MissingPage,

    #[error("No template engine is configured for page '{page}'")]
    UnknownEngine {
        page: String,
        extension: Option<String>,
        available: Vec<String>,
    },

    #[error("Cannot resolve page '{page}': {reason}")]
    ResolutionError {
        page: String,
        reason: String,
    },

    #[error("Render data for page '{page}' must be an object, got {found}")]
    InvalidContext {
        page: String,
        found: &'static str,
    },

    #[error("Template '{page}' not found")]
    TemplateNotFound {
        page: String,
        searched: Vec<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    #[error("Layout '{layout}' not found")]
    LayoutNotFound {
        layout: String,
        searched: Vec<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to compile template '{template}': {message}")]
    TemplateCompileError {
        template: String,
        message: String,
        line: Option<usize>,
    },

    #[error("Failed to render template '{template}': {message}")]
    TemplateRenderError {
        template: String,
        message: String,
        line: Option<usize>,
    },

    #[error("Invalid view configuration: {message}")]
    Config {
        message: String,
    },
}

/// Coarse classification of a [`ViewError`], for hosts mapping failures to
/// status codes or metrics labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingPage,
    UnknownEngine,
    ResolutionError,
    InvalidContext,
    TemplateNotFound,
    LayoutNotFound,
    TemplateCompileError,
    TemplateRenderError,
    Config,
}

impl ViewError {
    /// The kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingPage => ErrorKind::MissingPage,
            Self::UnknownEngine {
                ..
            } => ErrorKind::UnknownEngine,
            Self::ResolutionError {
                ..
            } => ErrorKind::ResolutionError,
            Self::InvalidContext {
                ..
            } => ErrorKind::InvalidContext,
            Self::TemplateNotFound {
                ..
            } => ErrorKind::TemplateNotFound,
            Self::LayoutNotFound {
                ..
            } => ErrorKind::LayoutNotFound,
            Self::TemplateCompileError {
                ..
            } => ErrorKind::TemplateCompileError,
            Self::TemplateRenderError {
                ..
            } => ErrorKind::TemplateRenderError,
            Self::Config {
                ..
            } => ErrorKind::Config,
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Error wrapper that carries a suggestion and extra details for display.
#[derive(Debug)]
pub struct ErrorContext {
    pub error: anyhow::Error,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(error: anyhow::Error) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

/// Convert any error into an [`ErrorContext`] with suggestions.
///
/// [`ViewError`]s found anywhere in the chain get a tailored suggestion; TOML
/// and I/O errors get generic ones; everything else is passed through.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let view_error = error.chain().find_map(|cause| cause.downcast_ref::<ViewError>());
    if let Some(view_error) = view_error {
        let (details, suggestion) = describe_view_error(view_error);
        let mut ctx = ErrorContext::new(error);
        if let Some(details) = details {
            ctx = ctx.with_details(details);
        }
        return ctx.with_suggestion(suggestion);
    }

    if error.chain().any(|cause| cause.downcast_ref::<toml::de::Error>().is_some()) {
        return ErrorContext::new(error)
            .with_suggestion("Check the TOML syntax in your folio.toml. Verify quotes, brackets, and table names")
            .with_details("TOML parsing errors are usually caused by missing quotes or mismatched brackets");
    }

    if error.chain().any(|cause| cause.downcast_ref::<serde_json::Error>().is_some()) {
        return ErrorContext::new(error)
            .with_suggestion("Render data must be a JSON object, e.g. {\"title\": \"Home\"}");
    }

    if let Some(io_error) = error.chain().find_map(|cause| cause.downcast_ref::<std::io::Error>())
    {
        match io_error.kind() {
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(error).with_suggestion(
                    "Check that the file or directory exists and the path is correct",
                );
            }
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(error)
                    .with_suggestion("Check the file permissions of the templates directory");
            }
            _ => {}
        }
    }

    ErrorContext::new(error)
}

fn describe_view_error(error: &ViewError) -> (Option<String>, String) {
    match error {
        ViewError::MissingPage => (
            None,
            "Pass the name of a template to render, e.g. `folio render index`".to_string(),
        ),
        ViewError::UnknownEngine {
            extension,
            available,
            ..
        } => {
            let details = format!("Configured engines: {}", available.join(", "));
            let suggestion = match extension {
                Some(ext) => {
                    let similar = find_similar(ext, available);
                    if similar.is_empty() {
                        format!("Register an engine for '.{ext}' files or rename the template")
                    } else {
                        format!("Did you mean: {}?", similar.join(", "))
                    }
                }
                None => "Add an extension to the page or set `default_engine`".to_string(),
            };
            (Some(details), suggestion)
        }
        ViewError::ResolutionError {
            ..
        } => (
            None,
            "Page names are relative to the template roots and may not climb above them"
                .to_string(),
        ),
        ViewError::InvalidContext {
            ..
        } => (None, "Pass render data as a map of names to values".to_string()),
        ViewError::TemplateNotFound {
            searched,
            ..
        }
        | ViewError::LayoutNotFound {
            searched,
            ..
        } => (
            Some(format!("Searched: {}", format_paths(searched))),
            "Check the `templates` roots in folio.toml and the spelling of the name".to_string(),
        ),
        ViewError::TemplateCompileError {
            line,
            ..
        } => (
            line.map(|line| format!("Line: {line}")),
            "Check template syntax for unclosed tags or invalid expressions".to_string(),
        ),
        ViewError::TemplateRenderError {
            line,
            ..
        } => (
            line.map(|line| format!("Line: {line}")),
            "Make sure every variable used by the template is present in the render data"
                .to_string(),
        ),
        ViewError::Config {
            ..
        } => (None, "Check the engine and layout settings in folio.toml".to_string()),
    }
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
}

/// Find names similar to `target` using Levenshtein distance.
pub(crate) fn find_similar(target: &str, available: &[String]) -> Vec<String> {
    let mut scored: Vec<_> =
        available.iter().map(|name| (name.clone(), levenshtein(target, name))).collect();

    scored.sort_by_key(|(_, dist)| *dist);

    scored
        .into_iter()
        .filter(|(_, dist)| *dist <= target.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
        .take(MAX_SUGGESTIONS)
        .map(|(name, _)| name)
        .collect()
}
