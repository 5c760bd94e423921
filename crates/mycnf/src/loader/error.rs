//! Error types for profile resolution.
//!
//! Responsibilities:
//! - Define error variants for every resolution failure surfaced to callers.
//!
//! Does NOT handle:
//! - Option file read failures; those are swallowed and logged (see `sources.rs`).
//!
//! Invariants:
//! - Variants carry the profile or variable name needed to act on the error.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::io::ErrorKind;
use thiserror::Error;

use crate::types::ProfileField;

/// Errors that can occur while resolving a connection profile.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Profile name is required to read MySQL option files")]
    EmptyProfileName,

    #[error("Profile '{0}' not found in any option file")]
    ProfileNotFound(String),

    #[error("Missing {field} for profile '{profile}', cannot continue")]
    MissingRequiredField {
        field: ProfileField,
        profile: String,
    },

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}
