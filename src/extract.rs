//! Classifies the current document as a daily note.
//!
//! A document counts as a daily note when its title or hierarchical path
//! contains a `YYYY-MM-DD` substring that is a real calendar date. This is
//! a best-effort heuristic over unstructured text; a document whose title
//! happens to contain a date-shaped substring will be misclassified.

use std::sync::Arc;

use chrono::NaiveDate;
use log::{debug, warn};
use regex::Regex;

use crate::{escape_sql_string, parse_date, DailyNoteIdentity, Kernel};

/// Determines whether a document is a daily note and, if so, its date and
/// owning notebook.
pub struct DateContextExtractor {
    kernel: Arc<dyn Kernel>,
}

/// Extracts the first valid calendar date from free-form text.
///
/// Kept as a pure function so a structured tag can replace the substring
/// heuristic without touching callers.
pub fn date_in_text(text: &str) -> Option<NaiveDate> {
    let pattern = Regex::new(r"\d{4}-\d{2}-\d{2}").expect("date pattern is valid");
    pattern
        .find(text)
        .and_then(|matched| parse_date(matched.as_str()))
}

impl DateContextExtractor {
    pub fn new(kernel: Arc<dyn Kernel>) -> Self {
        Self { kernel }
    }

    /// Returns the document's daily-note identity, or `None` when the
    /// document is not a daily note.
    ///
    /// Lookup failures are swallowed: failing to classify falls back to
    /// "treat as today", which is always safe.
    pub async fn classify(&self, doc_id: &str) -> Option<DailyNoteIdentity> {
        let stmt = format!(
            "SELECT content, hpath, box FROM blocks WHERE id = '{}' AND type = 'd' LIMIT 1",
            escape_sql_string(doc_id)
        );

        let rows = match self.kernel.sql(&stmt).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Could not extract date from document {}: {}", doc_id, e);
                return None;
            }
        };

        let row = rows.first()?;
        let content = row.get("content").and_then(|v| v.as_str()).unwrap_or("");
        let hpath = row.get("hpath").and_then(|v| v.as_str()).unwrap_or("");
        let notebook = row.get("box").and_then(|v| v.as_str()).unwrap_or("");

        let text = if content.is_empty() { hpath } else { content };
        let date = date_in_text(text)?;

        debug!("Document {} is the daily note for {}", doc_id, date);
        Some(DailyNoteIdentity {
            date,
            notebook_id: notebook.to_string(),
        })
    }
}
