//! Core data structures for the dailynav application.
//!
//! This module contains the primary types used throughout the application:
//! the kernel-facing data model and the CLI command surface.

use chrono::NaiveDate;
use clap::Subcommand;
use serde::{Deserialize, Serialize};

use crate::DailyNavError;

/// A specialized Result type for dailynav operations.
pub type Result<T> = std::result::Result<T, DailyNavError>;

/// A notebook known to the kernel, as reported by the notebook listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotebookDescriptor {
    /// Opaque notebook identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Whether the notebook is currently closed in the editor
    #[serde(default)]
    pub closed: bool,
}

/// Per-notebook configuration, nested under `conf` in the kernel's reply.
///
/// Only the fields the navigation pipeline reads are modelled here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotebookConf {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub closed: bool,

    /// Sprig template for the daily-note storage path, anchored to "now"
    #[serde(rename = "dailyNoteSavePath", default)]
    pub daily_note_save_path: String,
}

/// Envelope for a notebook-configuration reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotebookConfEnvelope {
    #[serde(rename = "box", default)]
    pub notebook: String,

    #[serde(default)]
    pub name: String,

    pub conf: NotebookConf,
}

/// Result of classifying a document as a daily note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyNoteIdentity {
    /// The calendar date the document is anchored to
    pub date: NaiveDate,
    /// The notebook owning the document
    pub notebook_id: String,
}

/// Outcome of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// The daily note that was located or created
    pub doc_id: String,
    /// The date the request resolved to
    pub target_date: NaiveDate,
    /// Whether the document was created by this request
    pub created: bool,
}

/// Available subcommands for the dailynav application
#[derive(Subcommand)]
pub enum Commands {
    /// Navigate to the daily note one day before the current one
    Prev {
        /// ID of the document you are navigating from
        #[clap(short, long)]
        doc: Option<String>,

        /// Do not open the resolved note in the editor
        #[clap(long)]
        no_open: bool,
    },

    /// Navigate to the daily note one day after the current one
    Next {
        /// ID of the document you are navigating from
        #[clap(short, long)]
        doc: Option<String>,

        /// Do not open the resolved note in the editor
        #[clap(long)]
        no_open: bool,
    },

    /// List the notebooks known to the kernel
    Notebooks {
        /// Format output as raw JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Configuration management
    Config {
        /// Show current configuration
        #[clap(short = 'S', long)]
        show: bool,

        /// Notebook to create daily notes in when none can be inferred
        #[clap(long)]
        fallback_notebook: Option<String>,

        /// Remove the configured fallback notebook
        #[clap(long)]
        clear_fallback: bool,

        /// Kernel base URL to persist
        #[clap(long)]
        url: Option<String>,

        /// Kernel API token to persist
        #[clap(long)]
        token: Option<String>,

        /// Reset configuration to defaults
        #[clap(short, long)]
        reset: bool,
    },
}
