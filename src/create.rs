//! Creates a daily note and tags it with its date attribute.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use log::{error, info};

use crate::{
    compact, format_date, DailyNavError, Kernel, PathTemplateRenderer, Result,
    DEFAULT_DAILY_NOTE_PATH,
};

/// Creates daily-note documents according to the owning notebook's
/// configuration.
pub struct DailyNoteCreator {
    kernel: Arc<dyn Kernel>,
    renderer: PathTemplateRenderer,
}

impl DailyNoteCreator {
    pub fn new(kernel: Arc<dyn Kernel>) -> Self {
        let renderer = PathTemplateRenderer::new(kernel.clone());
        Self { kernel, renderer }
    }

    /// Creates the daily note for `target` in `notebook_id` and returns
    /// the new document's ID.
    ///
    /// The document's existence is the success criterion; the
    /// `custom-dailynote-YYYYMMDD` attribute is a secondary indexing aid
    /// whose failure is logged but never rolls back the creation.
    pub async fn create(&self, notebook_id: &str, target: NaiveDate) -> Result<String> {
        let date_str = format_date(target);

        let conf = self.kernel.notebook_conf(notebook_id).await.map_err(|e| {
            error!("Could not get notebook configuration: {}", e);
            DailyNavError::NotebookConfigUnavailable {
                notebook: notebook_id.to_string(),
            }
        })?;

        let template = if conf.conf.daily_note_save_path.is_empty() {
            DEFAULT_DAILY_NOTE_PATH.to_string()
        } else {
            conf.conf.daily_note_save_path
        };

        let path = self.renderer.render(&template, &date_str).await;

        let doc_id = self
            .kernel
            .create_doc_with_md(notebook_id, &path, "")
            .await
            .map_err(|e| DailyNavError::CreationFailed {
                date: date_str.clone(),
                message: e.to_string(),
            })?;

        if doc_id.is_empty() {
            return Err(DailyNavError::CreationFailed {
                date: date_str,
                message: "kernel returned no document ID".to_string(),
            });
        }

        info!("Created daily note {} at {}", doc_id, path);
        self.tag_with_date(&doc_id, &date_str).await;

        Ok(doc_id)
    }

    /// Best-effort `custom-dailynote-YYYYMMDD = YYYYMMDD` attribute upsert.
    async fn tag_with_date(&self, doc_id: &str, date_str: &str) {
        let yyyymmdd = compact(date_str);
        let attr_name = format!("custom-dailynote-{}", yyyymmdd);

        let mut attrs = HashMap::new();
        attrs.insert(attr_name, yyyymmdd);

        if let Err(e) = self.kernel.set_block_attrs(doc_id, attrs).await {
            error!("Error setting daily note attribute on {}: {}", doc_id, e);
        }
    }
}
