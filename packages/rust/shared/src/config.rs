//! Application configuration for the competency dataset converter.
//!
//! Config is read from `competency-converter.toml`: an explicit `--config`
//! path, else the working directory, else `~/.competency-converter/`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConverterError, Result};
use crate::types::{LabelSelection, Language};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "competency-converter.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".competency-converter";

/// Default input dataset file name.
pub const DEFAULT_INPUT_FILE: &str = "competency_dataset.json";

/// Default output file for the transformation view.
pub const DEFAULT_TRANSFORMATION_FILE: &str = "transformed_dataset.json";

/// Default output file for the classification view.
pub const DEFAULT_CLASSIFICATION_FILE: &str = "classification_dataset.json";

// ---------------------------------------------------------------------------
// Config structs (matching competency-converter.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Input and output file locations.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Raw dataset handling.
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Classification view options.
    #[serde(default)]
    pub classification: ClassificationConfig,
}

/// `[paths]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Raw competency dataset.
    #[serde(default = "default_input")]
    pub input: String,

    /// Where the transformation pairs are written.
    #[serde(default = "default_transformation_output")]
    pub transformation_output: String,

    /// Where the classification pairs are written.
    #[serde(default = "default_classification_output")]
    pub classification_output: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            transformation_output: default_transformation_output(),
            classification_output: default_classification_output(),
        }
    }
}

fn default_input() -> String {
    DEFAULT_INPUT_FILE.into()
}
fn default_transformation_output() -> String {
    DEFAULT_TRANSFORMATION_FILE.into()
}
fn default_classification_output() -> String {
    DEFAULT_CLASSIFICATION_FILE.into()
}

/// `[dataset]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Fail when the top-level `label_lookup` entry is absent.
    #[serde(default = "default_true")]
    pub require_label_lookup: bool,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            require_label_lookup: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// `[classification]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassificationConfig {
    /// Label groups whose ids are kept.
    #[serde(default)]
    pub include_labels: LabelSelection,

    /// `"EN"` for English text, anything else for German.
    #[serde(default)]
    pub lang: Language,
}

// ---------------------------------------------------------------------------
// Convert config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime conversion configuration, merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Raw dataset path.
    pub input: PathBuf,
    /// Transformation view output path.
    pub transformation_output: PathBuf,
    /// Classification view output path.
    pub classification_output: PathBuf,
    /// Fail when `label_lookup` is absent.
    pub require_label_lookup: bool,
    /// Enabled label groups.
    pub include_labels: LabelSelection,
    /// Classification text language.
    pub lang: Language,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for ConvertConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            input: PathBuf::from(&config.paths.input),
            transformation_output: PathBuf::from(&config.paths.transformation_output),
            classification_output: PathBuf::from(&config.paths.classification_output),
            require_label_lookup: config.dataset.require_label_lookup,
            include_labels: config.classification.include_labels.clone(),
            lang: config.classification.lang,
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the user config directory (`~/.competency-converter/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ConverterError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the user config file.
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Resolve the config file to use, without reading it.
///
/// An explicit path always wins; otherwise the working directory is checked
/// before the user config directory.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        return Ok(Some(path.to_path_buf()));
    }

    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Ok(Some(local));
    }

    let user = config_file_path()?;
    Ok(user.exists().then_some(user))
}

/// Load the application config. Returns defaults if no config file exists.
///
/// An explicit path that does not exist is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    match resolve_config_path(explicit)? {
        Some(path) => load_config_from(&path),
        None => {
            tracing::debug!("config file not found, using defaults");
            Ok(AppConfig::default())
        }
    }
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ConverterError::read(path, e))?;

    let config = toml::from_str(&content).map_err(|e| {
        ConverterError::config(format!("failed to parse {}: {e}", path.display()))
    })?;
    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(config)
}

/// Write a default config file to `path`, creating parent directories.
pub fn init_config_at(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ConverterError::io(parent, e))?;
    }

    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| ConverterError::config(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| ConverterError::io(path, e))?;
    tracing::info!(path = %path.display(), "created default config file");
    Ok(())
}

/// Create the user config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let path = config_file_path()?;
    init_config_at(&path)?;
    Ok(path)
}
