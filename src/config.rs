// Configuration loaded from YAML

use crate::activity::DEFAULT_ACTIVITY_CAPACITY;
use crate::query::DEFAULT_LIMIT;
use crate::store::StoreOptions;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const APP_DIR: &str = "resourcestore";
const CONFIG_FILE: &str = "resourcestore.yml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Page size used when a query does not set one
    pub default_limit: usize,
    /// Alert when available stock drops below this
    pub low_stock_threshold: u32,
    /// Enforce available <= total on writes
    pub strict_quantities: bool,
    /// Stock movements kept in the activity log
    pub activity_log_size: usize,
    /// JSONL file to seed the store from
    pub data_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            low_stock_threshold: 5,
            strict_quantities: false,
            activity_log_size: DEFAULT_ACTIVITY_CAPACITY,
            data_file: None,
        }
    }
}

impl Config {
    /// Load from `path` if given, else the user config file if present, else defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        info!(file = ?path, "Loaded config");
        Ok(config)
    }

    /// `<config dir>/resourcestore/resourcestore.yml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            strict_quantities: self.strict_quantities,
            activity_capacity: self.activity_log_size,
        }
    }
}
