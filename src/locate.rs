//! Searches the document store for an existing daily note.

use std::sync::Arc;

use log::{debug, error};

use crate::{escape_like_pattern, Kernel};

/// Finds a daily note whose title or path contains a target date string.
pub struct DailyNoteLocator {
    kernel: Arc<dyn Kernel>,
}

impl DailyNoteLocator {
    pub fn new(kernel: Arc<dyn Kernel>) -> Self {
        Self { kernel }
    }

    /// Returns the first matching document in kernel order, or `None`.
    ///
    /// A query failure is logged and treated as "not found"; the caller
    /// then proceeds to creation, which can produce a duplicate if the
    /// query failed rather than found nothing.
    pub async fn find(&self, date_str: &str) -> Option<String> {
        let pattern = escape_like_pattern(date_str);
        let stmt = format!(
            "SELECT id FROM blocks \
             WHERE type = 'd' \
             AND (content LIKE '%{pattern}%' ESCAPE '\\' \
             OR hpath LIKE '%{pattern}%' ESCAPE '\\') \
             LIMIT 1"
        );

        let rows = match self.kernel.sql(&stmt).await {
            Ok(rows) => rows,
            Err(e) => {
                error!("Error finding daily note for {}: {}", date_str, e);
                return None;
            }
        };

        let id = rows
            .first()
            .and_then(|row| row.get("id"))
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());

        match &id {
            Some(id) => debug!("Found daily note {} for {}", id, date_str),
            None => debug!("No daily note found for {}", date_str),
        }

        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::mock::MockKernel;

    #[tokio::test]
    async fn find_returns_first_match() {
        let kernel = Arc::new(MockKernel::new());
        kernel.queue_sql_rows(vec![MockKernel::row(&[("id", "doc-42")])]);

        let locator = DailyNoteLocator::new(kernel);
        assert_eq!(locator.find("2026-01-17").await.as_deref(), Some("doc-42"));
    }

    #[tokio::test]
    async fn find_returns_none_when_store_has_no_match() {
        let kernel = Arc::new(MockKernel::new());

        let locator = DailyNoteLocator::new(kernel);
        assert_eq!(locator.find("2026-01-17").await, None);
    }

    #[tokio::test]
    async fn query_failure_is_treated_as_not_found() {
        let kernel = Arc::new(MockKernel::new());
        kernel.queue_sql_error();

        let locator = DailyNoteLocator::new(kernel);
        assert_eq!(locator.find("2026-01-17").await, None);
    }

    #[tokio::test]
    async fn find_escapes_like_wildcards() {
        let kernel = Arc::new(MockKernel::new());
        let locator = DailyNoteLocator::new(kernel.clone());
        locator.find("2026-01-17").await;

        let log = kernel.sql_log.lock().unwrap();
        assert!(log[0].contains("LIKE '%2026-01-17%' ESCAPE '\\'"));
    }
}
