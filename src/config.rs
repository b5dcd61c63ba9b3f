//! Configuration handling for the wizard

use crate::state::AutosaveTiming;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Default key the snapshot is stored under
pub const DEFAULT_STORAGE_KEY: &str = "formData";

/// User configuration for the wizard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WizardConfig {
    /// Quiet period after the last keystroke before autosave runs
    pub debounce_ms: Option<u64>,
    /// Delay before the indicator switches from "Saving..." to "All changes saved"
    pub saved_message_delay_ms: Option<u64>,
    /// Key the snapshot is stored under
    pub storage_key: Option<String>,
    /// Directory holding snapshots (defaults to the platform data dir)
    pub storage_dir: Option<PathBuf>,
}

impl WizardConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "enroll", "enroll-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: WizardConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Autosave timing with defaults filled in
    pub fn autosave_timing(&self) -> AutosaveTiming {
        let defaults = AutosaveTiming::default();
        AutosaveTiming {
            debounce: self
                .debounce_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.debounce),
            saved_message_delay: self
                .saved_message_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.saved_message_delay),
        }
    }

    pub fn storage_key(&self) -> &str {
        self.storage_key.as_deref().unwrap_or(DEFAULT_STORAGE_KEY)
    }
}
