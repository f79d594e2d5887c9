use crate::editor::FormDefaults;
use crate::error::{CatalogError, Result};
use crate::seed::DEFAULT_IMAGES;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

/// Configuration for dispensary, stored in `<config dir>/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Images an entry may reference. The first one is used when a form
    /// leaves the image blank.
    #[serde(default = "default_images")]
    pub images: Vec<String>,

    /// JSON seed catalog to start from instead of the built-in one.
    #[serde(default)]
    pub seed_file: Option<PathBuf>,
}

fn default_images() -> Vec<String> {
    DEFAULT_IMAGES.iter().map(|s| s.to_string()).collect()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            images: default_images(),
            seed_file: None,
        }
    }
}

impl CatalogConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: CatalogConfig = serde_json::from_str(&content)?;
        if config.images.is_empty() {
            return Err(CatalogError::Config(format!(
                "{}: images must not be empty",
                config_path.display()
            )));
        }
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn default_image(&self) -> &str {
        self.images.first().map(String::as_str).unwrap_or_default()
    }

    pub fn form_defaults(&self) -> FormDefaults {
        FormDefaults::new(self.default_image())
    }
}
