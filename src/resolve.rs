//! Decides which notebook a new daily note belongs to.

use std::sync::Arc;

use log::{debug, info};

use crate::{DailyNavError, Kernel, Result};

/// Resolves the target notebook for daily-note creation.
///
/// Resolution order, first match wins:
/// 1. the preferred notebook (the one owning the current daily note),
/// 2. the configured fallback notebook,
/// 3. the first open notebook in kernel order,
/// 4. the first notebook regardless of state.
pub struct NotebookResolver {
    kernel: Arc<dyn Kernel>,
    fallback_notebook: Option<String>,
}

impl NotebookResolver {
    pub fn new(kernel: Arc<dyn Kernel>, fallback_notebook: Option<String>) -> Self {
        Self {
            kernel,
            fallback_notebook,
        }
    }

    pub async fn resolve(&self, preferred: Option<&str>) -> Result<String> {
        if let Some(notebook) = preferred {
            debug!("Using notebook {} from the current daily note", notebook);
            return Ok(notebook.to_string());
        }

        if let Some(notebook) = &self.fallback_notebook {
            debug!("Using configured fallback notebook {}", notebook);
            return Ok(notebook.clone());
        }

        let notebooks = self.kernel.ls_notebooks().await?;
        if notebooks.is_empty() {
            return Err(DailyNavError::NoNotebookAvailable);
        }

        let chosen = notebooks
            .iter()
            .find(|nb| !nb.closed)
            .unwrap_or(&notebooks[0]);

        info!("Resolved notebook {} ({})", chosen.name, chosen.id);
        Ok(chosen.id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::mock::MockKernel;

    #[tokio::test]
    async fn preferred_notebook_wins() {
        let kernel = Arc::new(MockKernel::new());
        kernel.add_notebook("open-1", "Open", false);

        let resolver = NotebookResolver::new(kernel, Some("fallback-1".to_string()));
        assert_eq!(resolver.resolve(Some("preferred-1")).await.unwrap(), "preferred-1");
    }

    #[tokio::test]
    async fn fallback_wins_when_no_preferred() {
        let kernel = Arc::new(MockKernel::new());
        kernel.add_notebook("open-1", "Open", false);

        let resolver = NotebookResolver::new(kernel, Some("fallback-1".to_string()));
        assert_eq!(resolver.resolve(None).await.unwrap(), "fallback-1");
    }

    #[tokio::test]
    async fn first_open_notebook_wins_over_closed_ones() {
        let kernel = Arc::new(MockKernel::new());
        kernel.add_notebook("closed-1", "Closed", true);
        kernel.add_notebook("open-1", "Open", false);
        kernel.add_notebook("open-2", "Also open", false);

        let resolver = NotebookResolver::new(kernel, None);
        assert_eq!(resolver.resolve(None).await.unwrap(), "open-1");
    }

    #[tokio::test]
    async fn first_notebook_is_used_when_all_are_closed() {
        let kernel = Arc::new(MockKernel::new());
        kernel.add_notebook("closed-1", "Closed", true);
        kernel.add_notebook("closed-2", "Also closed", true);

        let resolver = NotebookResolver::new(kernel, None);
        assert_eq!(resolver.resolve(None).await.unwrap(), "closed-1");
    }

    #[tokio::test]
    async fn empty_notebook_list_is_fatal() {
        let kernel = Arc::new(MockKernel::new());

        let resolver = NotebookResolver::new(kernel, None);
        assert!(matches!(
            resolver.resolve(None).await,
            Err(DailyNavError::NoNotebookAvailable)
        ));
    }

    #[tokio::test]
    async fn listing_failure_propagates() {
        let kernel = Arc::new(MockKernel {
            fail_ls_notebooks: true,
            ..MockKernel::new()
        });

        let resolver = NotebookResolver::new(kernel, None);
        assert!(matches!(
            resolver.resolve(None).await,
            Err(DailyNavError::Api { .. })
        ));
    }
}
