use crate::core::dirs::get_config_directory;
use crate::core::error::{ProviderError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Largest number of paths passed to a single git invocation
pub const DEFAULT_MAX_FILES_PER_BATCH: usize = 50;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ProviderSettings {
    /// Git executable, looked up on PATH when not absolute
    pub binary_path: PathBuf,
    /// Content directory relative to the repository root
    pub content_subdir: Option<PathBuf>,
    pub max_files_per_batch: usize,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            binary_path: PathBuf::from("git"),
            content_subdir: None,
            max_files_per_batch: DEFAULT_MAX_FILES_PER_BATCH,
        }
    }
}

impl ProviderSettings {
    /// Load from the user configuration directory, defaulting when nothing is saved
    pub fn load() -> Result<Self> {
        let settings_file = get_config_directory()?.join(SETTINGS_FILE_NAME);
        Self::load_from(&settings_file)
    }

    pub fn load_from(settings_file: &Path) -> Result<Self> {
        if !settings_file.exists() {
            log::debug!(
                "No settings file at {}, using defaults",
                settings_file.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(settings_file)
            .map_err(|e| ProviderError::settings_read_failed(settings_file, e))?;
        let mut settings: Self = serde_json::from_str(&content)
            .map_err(|e| ProviderError::settings_parse_failed(settings_file, e))?;

        if settings.max_files_per_batch == 0 {
            log::warn!("max_files_per_batch must be positive, using {DEFAULT_MAX_FILES_PER_BATCH}");
            settings.max_files_per_batch = DEFAULT_MAX_FILES_PER_BATCH;
        }
        Ok(settings)
    }

    pub fn save(&self) -> Result<()> {
        let settings_file = get_config_directory()?.join(SETTINGS_FILE_NAME);
        self.save_to(&settings_file)
    }

    pub fn save_to(&self, settings_file: &Path) -> Result<()> {
        if let Some(parent) = settings_file.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ProviderError::settings_write_failed(parent, e))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(settings_file, content)
            .map_err(|e| ProviderError::settings_write_failed(settings_file, e))?;
        Ok(())
    }
}
