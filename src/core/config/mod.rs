use crate::core::paths;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use toml_edit::{DocumentMut, Item, Table, Value as TomlEditValue};

mod endpoints;
mod probes;

pub use endpoints::*;
pub use probes::*;

pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub audio_service: AudioServiceConfig,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
    #[serde(default)]
    pub text: TextProbeConfig,
    #[serde(default)]
    pub audio: AudioProbeConfig,
    #[serde(default)]
    pub image: ImageProbeConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Report directory; relative paths resolve against the project root.
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { dir: default_output_dir() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Config {
    /// Reject values that would break run-wide guarantees even though they deserialize.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.text.max_input_chars > DEFAULT_TEXT_MAX_INPUT_CHARS {
            return Err(AppError::config_error(format!(
                "text.max_input_chars must be at most {DEFAULT_TEXT_MAX_INPUT_CHARS}, got {}",
                self.text.max_input_chars
            )));
        }
        Ok(())
    }
}

pub fn load_config() -> Result<Config, AppError> {
    ensure_config_exists()?;
    let path = paths::user_config_file()?;
    let contents = fs::read_to_string(&path)?;
    parse_config(&contents)
}

/// Load the config file without creating it; `None` when it does not exist yet.
pub fn load_existing_config() -> Result<Option<Config>, AppError> {
    let path = paths::user_config_file()?;
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(&path)?;
    parse_config(&contents).map(Some)
}

fn parse_config(contents: &str) -> Result<Config, AppError> {
    let config: Config = toml::from_str(contents)
        .map_err(|err| AppError::config_error(format!("Failed to parse config: {err}")))?;
    config.validate()?;
    Ok(config)
}

/// Check that an edited document still loads as a valid [`Config`].
pub fn validate_document(document: &DocumentMut) -> Result<Config, AppError> {
    parse_config(&document.to_string())
}

pub fn save_config(config: &Config) -> Result<(), AppError> {
    let path = paths::user_config_file()?;
    write_config_to_path(&path, config)
}

pub fn load_config_document() -> Result<DocumentMut, AppError> {
    ensure_config_exists()?;
    let path = paths::user_config_file()?;
    let contents = fs::read_to_string(&path)?;
    contents
        .parse::<DocumentMut>()
        .map_err(|err| AppError::config_error(format!("Failed to parse config: {err}")))
}

pub fn save_config_document(document: &DocumentMut) -> Result<(), AppError> {
    let path = paths::user_config_file()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(&path)?;
    file.write_all(document.to_string().as_bytes())?;
    Ok(())
}

fn write_config_to_path(path: &Path, config: &Config) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(path)?;
    let contents = toml::to_string_pretty(config)
        .map_err(|err| AppError::config_error(format!("Failed to serialise config: {err}")))?;
    file.write_all(contents.as_bytes())?;
    Ok(())
}

pub fn ensure_config_exists() -> Result<(), AppError> {
    let path = paths::user_config_file()?;
    if path.exists() {
        return Ok(());
    }

    write_config_to_path(&path, &Config::default())
}

/// Overwrite the config file with defaults.
pub fn reset_config() -> Result<(), AppError> {
    let path = paths::user_config_file()?;
    write_config_to_path(&path, &Config::default())
}

pub fn infer_toml_edit_value(raw: &str) -> TomlEditValue {
    let trimmed = raw.trim();
    if let Ok(boolean) = trimmed.parse::<bool>() {
        return TomlEditValue::from(boolean);
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return TomlEditValue::from(int);
    }
    if let Ok(float) = trimmed.parse::<f64>() {
        return TomlEditValue::from(float);
    }
    TomlEditValue::from(trimmed)
}

pub fn set_document_value(
    document: &mut DocumentMut,
    key_path: &[&str],
    value: TomlEditValue,
) -> Result<(), AppError> {
    if key_path.is_empty() {
        return Err(AppError::config_error("Configuration key must not be empty"));
    }
    let mut current: &mut Table = document.as_table_mut();
    for (index, segment) in key_path.iter().enumerate() {
        if index + 1 == key_path.len() {
            current.insert(segment, Item::Value(value));
            return Ok(());
        }

        let item = current.entry(segment).or_insert(Item::Table(Default::default()));
        current = item.as_table_mut().ok_or_else(|| {
            AppError::config_error(format!(
                "Configuration key '{}' conflicts with existing non-table value",
                key_path[..=index].join(".")
            ))
        })?;
    }

    Ok(())
}
