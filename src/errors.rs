//! Error types for the dailynav application.
//!
//! This module defines custom error types that categorize different failures
//! that can occur while navigating to or creating daily notes.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for the dailynav application.
#[derive(Error, Debug)]
pub enum DailyNavError {
    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Errors related to the HTTP transport to the kernel.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The kernel answered a request with a non-zero response code.
    #[error("Kernel API error (code {code}): {message}")]
    Api { code: i64, message: String },

    /// No notebook could be determined for daily-note creation.
    #[error("Could not determine a notebook. Open a notebook or configure a fallback notebook.")]
    NoNotebookAvailable,

    /// The notebook's configuration could not be retrieved.
    #[error("Could not get configuration for notebook {notebook}")]
    NotebookConfigUnavailable { notebook: String },

    /// The kernel did not create the requested daily note.
    #[error("Failed to create daily note {date}: {message}")]
    CreationFailed { date: String, message: String },

    /// A day offset pushed the target date outside the representable range.
    #[error("Date {date} with offset {offset} is out of range")]
    DateOutOfRange { date: String, offset: i64 },

    /// Errors related to configuration.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Directory creation or access failed.
    #[error("Failed to create or access directory: {path}")]
    DirectoryError { path: PathBuf },

    #[error("{message}")]
    OpenerError { message: String },
}
