//! Orchestrates the end-to-end "go to day N relative to current" operation.

use std::sync::Arc;

use chrono::NaiveDate;
use log::{info, warn};

use crate::{
    format_date, shift, today, DailyNoteCreator, DailyNoteLocator, DateContextExtractor, Kernel,
    Navigation, NotebookResolver, Result,
};

/// Resolves a navigation request to a daily note, creating it on miss.
///
/// One invocation produces exactly one user-visible outcome: a silent open
/// of an existing note, a success notification naming the created date, or
/// an error notification. The locate/create sequence is not atomic; two
/// near-simultaneous requests for the same date can both create a note.
pub struct Navigator {
    kernel: Arc<dyn Kernel>,
    extractor: DateContextExtractor,
    locator: DailyNoteLocator,
    resolver: NotebookResolver,
    creator: DailyNoteCreator,
    surface: bool,
}

impl Navigator {
    pub fn new(kernel: Arc<dyn Kernel>, fallback_notebook: Option<String>) -> Self {
        Self {
            extractor: DateContextExtractor::new(kernel.clone()),
            locator: DailyNoteLocator::new(kernel.clone()),
            resolver: NotebookResolver::new(kernel.clone(), fallback_notebook),
            creator: DailyNoteCreator::new(kernel.clone()),
            kernel,
            surface: true,
        }
    }

    /// Disables opening the resolved note in the editor.
    pub fn with_surfacing(mut self, surface: bool) -> Self {
        self.surface = surface;
        self
    }

    /// Navigates to the daily note `offset` days relative to the current
    /// document's date.
    ///
    /// `current_doc` is the document the user is navigating from, if any.
    /// The offset only has meaning relative to an identified daily note;
    /// in every other context the target date is today.
    pub async fn navigate(&self, current_doc: Option<&str>, offset: i64) -> Result<Navigation> {
        match self.resolve_target(current_doc, offset).await {
            Ok(navigation) => Ok(navigation),
            Err(e) => {
                if let Err(notify_err) = self.kernel.push_err_msg(&format!("Error: {}", e)).await {
                    warn!("Could not push error notification: {}", notify_err);
                }
                Err(e)
            }
        }
    }

    async fn resolve_target(&self, current_doc: Option<&str>, offset: i64) -> Result<Navigation> {
        let (target, preferred) = self.target_date(current_doc, offset).await?;
        let date_str = format_date(target);
        info!("Navigating to daily note for {}", date_str);

        if let Some(doc_id) = self.locator.find(&date_str).await {
            self.open(&doc_id).await;
            return Ok(Navigation {
                doc_id,
                target_date: target,
                created: false,
            });
        }

        let notebook = self.resolver.resolve(preferred.as_deref()).await?;
        let doc_id = self.creator.create(&notebook, target).await?;
        self.open(&doc_id).await;

        if let Err(e) = self
            .kernel
            .push_msg(&format!("Created daily note: {}", date_str))
            .await
        {
            warn!("Could not push creation notification: {}", e);
        }

        Ok(Navigation {
            doc_id,
            target_date: target,
            created: true,
        })
    }

    /// Computes the target date and, when navigating from a daily note,
    /// the preferred notebook.
    async fn target_date(
        &self,
        current_doc: Option<&str>,
        offset: i64,
    ) -> Result<(NaiveDate, Option<String>)> {
        if let Some(doc_id) = current_doc {
            if let Some(identity) = self.extractor.classify(doc_id).await {
                let target = shift(identity.date, offset)?;
                return Ok((target, Some(identity.notebook_id)));
            }
        }

        Ok((today(), None))
    }

    async fn open(&self, doc_id: &str) {
        if !self.surface {
            return;
        }

        // Fire-and-forget: surfacing failures never fail the navigation.
        if let Err(e) = self.kernel.open_doc(doc_id).await {
            warn!("Could not open document {}: {}", doc_id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::mock::MockKernel;
    use crate::DailyNavError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn daily_note_row(date_str: &str, notebook: &str) -> Vec<crate::kernel::Row> {
        vec![MockKernel::row(&[
            ("content", date_str),
            ("hpath", ""),
            ("box", notebook),
        ])]
    }

    #[tokio::test]
    async fn offset_shifts_the_current_daily_note_date() {
        let kernel = Arc::new(MockKernel::new());
        kernel.queue_sql_rows(daily_note_row("2024-02-29", "nb-1"));
        kernel.queue_sql_rows(vec![MockKernel::row(&[("id", "doc-existing")])]);

        let navigator = Navigator::new(kernel.clone(), None);
        let nav = navigator.navigate(Some("doc-current"), 1).await.unwrap();

        assert_eq!(nav.target_date, date(2024, 3, 1));
        assert_eq!(nav.doc_id, "doc-existing");
        assert!(!nav.created);
    }

    #[tokio::test]
    async fn negative_offset_crosses_year_boundaries() {
        let kernel = Arc::new(MockKernel::new());
        kernel.queue_sql_rows(daily_note_row("2026-01-01", "nb-1"));
        kernel.queue_sql_rows(vec![MockKernel::row(&[("id", "doc-existing")])]);

        let navigator = Navigator::new(kernel, None);
        let nav = navigator.navigate(Some("doc-current"), -1).await.unwrap();

        assert_eq!(nav.target_date, date(2025, 12, 31));
    }

    #[tokio::test]
    async fn offset_ignored_when_current_doc_is_not_a_daily_note() {
        let kernel = Arc::new(MockKernel::new());
        kernel.queue_sql_rows(vec![MockKernel::row(&[
            ("content", "shopping list"),
            ("hpath", "/inbox/shopping list"),
            ("box", "nb-1"),
        ])]);
        kernel.queue_sql_rows(vec![MockKernel::row(&[("id", "doc-today")])]);

        let navigator = Navigator::new(kernel, None);
        let nav = navigator.navigate(Some("doc-current"), 1).await.unwrap();

        assert_eq!(nav.target_date, today());
    }

    #[tokio::test]
    async fn offset_ignored_without_a_current_document() {
        let kernel = Arc::new(MockKernel::new());
        kernel.queue_sql_rows(vec![MockKernel::row(&[("id", "doc-today")])]);

        let navigator = Navigator::new(kernel, None);
        let nav = navigator.navigate(None, 1).await.unwrap();

        assert_eq!(nav.target_date, today());
        assert!(!nav.created);
    }

    #[tokio::test]
    async fn hit_opens_silently_without_creation() {
        let kernel = Arc::new(MockKernel::new());
        kernel.queue_sql_rows(daily_note_row("2026-01-17", "nb-1"));
        kernel.queue_sql_rows(vec![MockKernel::row(&[("id", "doc-16th")])]);

        let navigator = Navigator::new(kernel.clone(), None);
        let nav = navigator.navigate(Some("doc-current"), -1).await.unwrap();

        assert_eq!(nav.target_date, date(2026, 1, 16));
        assert_eq!(nav.doc_id, "doc-16th");
        assert!(kernel.created.lock().unwrap().is_empty());
        assert!(kernel.msgs.lock().unwrap().is_empty());
        assert_eq!(kernel.opened.lock().unwrap().as_slice(), ["doc-16th"]);
    }

    #[tokio::test]
    async fn miss_creates_in_the_current_notes_notebook() {
        let kernel = Arc::new(MockKernel::new());
        kernel.queue_sql_rows(daily_note_row("2026-01-17", "nb-7"));
        // locate finds nothing
        kernel.queue_sql_rows(vec![]);
        kernel.set_conf("nb-7", "");
        kernel.add_notebook("nb-other", "Other", false);

        let navigator = Navigator::new(kernel.clone(), Some("nb-fallback".to_string()));
        let nav = navigator.navigate(Some("doc-current"), 1).await.unwrap();

        assert!(nav.created);
        assert_eq!(nav.target_date, date(2026, 1, 18));

        let created = kernel.created.lock().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].0, "nb-7");
    }

    #[tokio::test]
    async fn miss_without_context_creates_today_in_the_open_notebook() {
        let kernel = Arc::new(MockKernel::new());
        kernel.add_notebook("nb-open", "Journal", false);
        kernel.set_conf("nb-open", "");

        let navigator = Navigator::new(kernel.clone(), None);
        let nav = navigator.navigate(None, 1).await.unwrap();

        let today_str = format_date(today());
        assert!(nav.created);
        assert_eq!(nav.target_date, today());

        let created = kernel.created.lock().unwrap();
        assert_eq!(created[0].0, "nb-open");
        assert_eq!(created[0].1, format!("/{}/", today_str));

        let attrs_set = kernel.attrs_set.lock().unwrap();
        let attr_name = format!("custom-dailynote-{}", crate::compact(&today_str));
        assert_eq!(
            attrs_set[0].1.get(&attr_name).cloned(),
            Some(crate::compact(&today_str))
        );

        let msgs = kernel.msgs.lock().unwrap();
        assert_eq!(
            msgs.as_slice(),
            [format!("Created daily note: {}", today_str)]
        );
    }

    #[tokio::test]
    async fn second_navigation_finds_first_creation() {
        let kernel = Arc::new(MockKernel::new());
        kernel.add_notebook("nb-open", "Journal", false);
        kernel.set_conf("nb-open", "");

        let navigator = Navigator::new(kernel.clone(), None);
        let first = navigator.navigate(None, 1).await.unwrap();
        assert!(first.created);

        // The store now reports the note created above.
        kernel.queue_sql_rows(vec![MockKernel::row(&[("id", first.doc_id.as_str())])]);
        let second = navigator.navigate(None, 1).await.unwrap();

        assert!(!second.created);
        assert_eq!(second.doc_id, first.doc_id);
        assert_eq!(kernel.created.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn no_notebook_available_pushes_one_error_notification() {
        let kernel = Arc::new(MockKernel::new());

        let navigator = Navigator::new(kernel.clone(), None);
        let result = navigator.navigate(None, 1).await;

        assert!(matches!(result, Err(DailyNavError::NoNotebookAvailable)));
        assert_eq!(kernel.err_msgs.lock().unwrap().len(), 1);
        assert!(kernel.created.lock().unwrap().is_empty());
        assert!(kernel.opened.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn creation_failure_names_the_target_date() {
        let kernel = Arc::new(MockKernel {
            fail_create: true,
            ..MockKernel::new()
        });
        kernel.add_notebook("nb-open", "Journal", false);
        kernel.set_conf("nb-open", "");

        let navigator = Navigator::new(kernel.clone(), None);
        let result = navigator.navigate(None, 1).await;

        let today_str = format_date(today());
        match result {
            Err(DailyNavError::CreationFailed { date, .. }) => assert_eq!(date, today_str),
            other => panic!("expected CreationFailed, got {:?}", other.map(|n| n.doc_id)),
        }

        let err_msgs = kernel.err_msgs.lock().unwrap();
        assert_eq!(err_msgs.len(), 1);
        assert!(err_msgs[0].contains(&today_str));
    }

    #[tokio::test]
    async fn surfacing_can_be_disabled() {
        let kernel = Arc::new(MockKernel::new());
        kernel.queue_sql_rows(vec![MockKernel::row(&[("id", "doc-today")])]);

        let navigator = Navigator::new(kernel.clone(), None).with_surfacing(false);
        navigator.navigate(None, 1).await.unwrap();

        assert!(kernel.opened.lock().unwrap().is_empty());
    }
}
