use dirs::home_dir;
use serde::{Deserialize, Serialize};
use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::ZeptoError;
use crate::schedule::{DEFAULT_CATEGORY, DEFAULT_PREDICTION_LIMIT};

const DEFAULT_DIR_NAME: &str = ".zepto";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_SCAN_FACTOR: usize = 20;

/// Tunables for projecting recurring transactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectionConfig {
    /// Upcoming occurrences generated per recurring transaction.
    #[serde(default = "ProjectionConfig::default_prediction_limit")]
    pub prediction_limit: usize,
    /// Bound on forward-scan steps per requested date in `next_dates`.
    #[serde(default = "ProjectionConfig::default_scan_factor")]
    pub scan_factor: usize,
    #[serde(default = "ProjectionConfig::default_category")]
    pub default_category: String,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            prediction_limit: Self::default_prediction_limit(),
            scan_factor: Self::default_scan_factor(),
            default_category: Self::default_category(),
        }
    }
}

impl ProjectionConfig {
    pub fn default_prediction_limit() -> usize {
        DEFAULT_PREDICTION_LIMIT
    }

    pub fn default_scan_factor() -> usize {
        DEFAULT_SCAN_FACTOR
    }

    pub fn default_category() -> String {
        DEFAULT_CATEGORY.into()
    }

    pub fn validate(&self) -> Result<(), ZeptoError> {
        if self.prediction_limit == 0 {
            return Err(ZeptoError::Validation(
                "prediction_limit must be at least 1".into(),
            ));
        }
        if self.scan_factor == 0 {
            return Err(ZeptoError::Validation(
                "scan_factor must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Returns the application data directory, defaulting to `~/.zepto`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("ZEPTO_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Loads and persists [`ProjectionConfig`] as JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        Self {
            path: base.join(CONFIG_FILE),
        }
    }

    pub fn from_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Reads the configuration, falling back to defaults when no file exists yet.
    pub fn load(&self) -> Result<ProjectionConfig, ZeptoError> {
        if !self.path.exists() {
            return Ok(ProjectionConfig::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: ProjectionConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &ProjectionConfig) -> Result<(), ZeptoError> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "saved configuration");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), ZeptoError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
