//! Persisted configuration for the dailynav application.
//!
//! Settings are loaded once at startup and written back wholesale whenever
//! a `config` subcommand changes them.

use std::{fs, io::Write, path::Path, path::PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use which::which;

use crate::{DailyNavError, Result};

/// Default address of a locally running kernel.
pub const DEFAULT_KERNEL_URL: &str = "http://127.0.0.1:6806";

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the kernel's HTTP API
    pub kernel_url: String,

    /// API token, if the kernel requires one
    pub api_token: Option<String>,

    /// Notebook to create daily notes in when none can be inferred
    pub fallback_notebook: Option<String>,

    /// Command used to open `siyuan://` links in the editor
    pub opener_command: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kernel_url: DEFAULT_KERNEL_URL.to_string(),
            api_token: None,
            fallback_notebook: None,
            opener_command: None,
        }
    }
}

impl Config {
    /// Loads configuration from the given file, falling back to defaults
    /// when the file does not exist yet.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(
                "Config file {} does not exist, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config =
            serde_json::from_str(&content).map_err(|e| DailyNavError::ConfigError {
                message: format!("Invalid config file {}: {}", path.display(), e),
            })?;

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Saves the configuration, replacing the file atomically.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|_| DailyNavError::DirectoryError {
                    path: parent.to_path_buf(),
                })?;
            }
        }

        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mut temp_file = NamedTempFile::new_in(dir)?;

        let json = serde_json::to_string_pretty(self)?;
        temp_file.write_all(json.as_bytes())?;
        temp_file.flush()?;

        temp_file
            .persist(path)
            .map_err(|e| DailyNavError::Io(e.error))?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    // This method provides smart fallbacks when no opener is configured
    pub fn get_opener_command(&self) -> String {
        // First try the configured opener
        if let Some(opener) = &self.opener_command {
            return opener.clone();
        }

        // Fall back to platform defaults
        if cfg!(windows) {
            "cmd /C start".to_string()
        } else if cfg!(target_os = "macos") {
            "open".to_string()
        } else {
            for opener in &["xdg-open", "gio open"] {
                let binary = opener.split_whitespace().next().unwrap_or(opener);
                if which(binary).is_ok() {
                    return opener.to_string();
                }
            }
            "xdg-open".to_string()
        }
    }
}

/// Default location of the config file, under the platform config dir.
pub fn default_config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| DailyNavError::ConfigError {
        message: "Could not determine the platform configuration directory".to_string(),
    })?;

    Ok(base.join("dailynav").join("config.json"))
}
