//! CLI module for the dailynav application
//!
//! This module handles the command-line interface for navigating daily
//! notes and managing configuration.

use std::{path::PathBuf, sync::Arc};

use console::style;
use log::debug;

use crate::{format_date, Commands, Config, Kernel, Navigator, Result};

/// CLI Application handler - processes CLI commands against the kernel
pub struct App {
    /// The kernel the commands operate on
    kernel: Arc<dyn Kernel>,

    /// Application configuration
    config: Config,

    /// Where configuration changes are persisted
    config_path: PathBuf,

    /// Whether to display verbose output
    verbose: bool,
}

impl App {
    /// Create a new CLI application with the given kernel and config
    pub fn new(kernel: Arc<dyn Kernel>, config: Config, config_path: PathBuf, verbose: bool) -> Self {
        Self {
            kernel,
            config,
            config_path,
            verbose,
        }
    }

    /// Run the CLI application with the given command
    pub async fn run(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Prev { doc, no_open } => self.navigate(doc, -1, no_open).await?,

            Commands::Next { doc, no_open } => self.navigate(doc, 1, no_open).await?,

            Commands::Notebooks { json } => self.list_notebooks(json).await?,

            Commands::Config {
                show,
                fallback_notebook,
                clear_fallback,
                url,
                token,
                reset,
            } => {
                self.handle_config(show, fallback_notebook, clear_fallback, url, token, reset)?;
            }
        }

        Ok(())
    }

    async fn navigate(&self, doc: Option<String>, offset: i64, no_open: bool) -> Result<()> {
        let navigator = Navigator::new(
            self.kernel.clone(),
            self.config.fallback_notebook.clone(),
        )
        .with_surfacing(!no_open);

        let navigation = navigator.navigate(doc.as_deref(), offset).await?;
        let date_str = format_date(navigation.target_date);

        if navigation.created {
            println!(
                "{} {} ({})",
                style("Created daily note").green(),
                date_str,
                navigation.doc_id
            );
        } else {
            println!(
                "{} {} ({})",
                style("Opened daily note").cyan(),
                date_str,
                navigation.doc_id
            );
        }

        if self.verbose {
            println!("  siyuan://blocks/{}", navigation.doc_id);
        }

        Ok(())
    }

    async fn list_notebooks(&self, json: bool) -> Result<()> {
        let notebooks = self.kernel.ls_notebooks().await?;

        if json {
            println!("{}", serde_json::to_string_pretty(&notebooks)?);
            return Ok(());
        }

        if notebooks.is_empty() {
            println!("No notebooks found");
            return Ok(());
        }

        for notebook in &notebooks {
            let mut line = format!("{}  {}", style(&notebook.id).dim(), notebook.name);

            if notebook.closed {
                line.push_str(&format!(" {}", style("(closed)").yellow()));
            }

            if self.config.fallback_notebook.as_deref() == Some(notebook.id.as_str()) {
                line.push_str(&format!(" {}", style("[fallback]").green()));
            }

            println!("{}", line);
        }

        Ok(())
    }

    fn handle_config(
        &mut self,
        show: bool,
        fallback_notebook: Option<String>,
        clear_fallback: bool,
        url: Option<String>,
        token: Option<String>,
        reset: bool,
    ) -> Result<()> {
        let mut changed = false;

        if reset {
            debug!("Resetting configuration to defaults");
            self.config = Config::default();
            changed = true;
            println!("Configuration reset to defaults");
        }

        if let Some(notebook) = fallback_notebook {
            self.config.fallback_notebook = Some(notebook);
            changed = true;
            println!("Fallback notebook saved");
        }

        if clear_fallback {
            self.config.fallback_notebook = None;
            changed = true;
            println!("Fallback notebook cleared");
        }

        if let Some(url) = url {
            self.config.kernel_url = url;
            changed = true;
            println!("Kernel URL saved");
        }

        if let Some(token) = token {
            self.config.api_token = Some(token);
            changed = true;
            println!("Kernel API token saved");
        }

        if changed {
            self.config.save(&self.config_path)?;
        }

        if show || !changed {
            println!("{}", serde_json::to_string_pretty(&self.config)?);
        }

        Ok(())
    }
}
