//! Renders a notebook's daily-note path template for an arbitrary date.
//!
//! Notebook templates are authored against "now", e.g.
//! `/daily note/{{now | date "2006-01-02"}}`. To anchor such a template to
//! a different target date, every `{{now |` token is rewritten to
//! `{{toDate "2006-01-02" "<date>" |` before the template is handed to the
//! kernel's Sprig engine; the downstream formatting directives are left
//! untouched.

use std::sync::Arc;

use log::error;
use regex::Regex;

use crate::Kernel;

/// The path template used when a notebook has none configured.
pub const DEFAULT_DAILY_NOTE_PATH: &str = "/{{now | date \"2006-01-02\"}}/";

/// Converts a "current-date" path template into a path for a target date.
pub struct PathTemplateRenderer {
    kernel: Arc<dyn Kernel>,
}

/// Rewrites every `{{now |` token to anchor the template to `date_str`.
pub fn rewrite_for_date(template: &str, date_str: &str) -> String {
    let now_token = Regex::new(r"\{\{now\s*\|").expect("now-token pattern is valid");
    now_token
        .replace_all(
            template,
            format!("{{{{toDate \"2006-01-02\" \"{}\" |", date_str),
        )
        .to_string()
}

impl PathTemplateRenderer {
    pub fn new(kernel: Arc<dyn Kernel>) -> Self {
        Self { kernel }
    }

    /// Renders `template` anchored to `date_str`.
    ///
    /// If the kernel's rendering engine fails for any reason, falls back to
    /// the flat path `/<date_str>/` so creation can always proceed.
    pub async fn render(&self, template: &str, date_str: &str) -> String {
        let anchored = rewrite_for_date(template, date_str);

        match self.kernel.render_sprig(&anchored).await {
            Ok(path) => path,
            Err(e) => {
                error!("Error rendering daily note path template: {}", e);
                format!("/{}/", date_str)
            }
        }
    }
}
