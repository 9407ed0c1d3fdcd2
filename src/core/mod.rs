//! Core types shared by every folio module.
//!
//! At the moment this is the error taxonomy and the user-facing error
//! reporting used by the CLI.

pub mod error;

pub use error::{ErrorContext, ErrorKind, ViewError, ViewResult, user_friendly_error};
