use crate::error::AppError;
use std::path::{Path, PathBuf};
use std::{env, fs};

/// Resolve the project root directory for the CLI.
pub fn project_root() -> Result<PathBuf, AppError> {
    match env::var_os("MODEL_HEALTH_PROJECT_ROOT") {
        Some(root) => Ok(PathBuf::from(root)),
        None => Ok(env::current_dir()?),
    }
}

/// Resolve the directory containing the persistent `config.toml` file.
pub fn user_config_dir() -> Result<PathBuf, AppError> {
    if let Some(override_dir) = env::var_os("MODEL_HEALTH_CONFIG_DIR") {
        return Ok(PathBuf::from(override_dir));
    }

    dirs::home_dir()
        .map(|dir| dir.join(".config").join("model-health"))
        .ok_or_else(|| AppError::config_error("Could not determine home directory"))
}

/// Resolve the absolute path to the user's persistent configuration file.
pub fn user_config_file() -> Result<PathBuf, AppError> {
    Ok(user_config_dir()?.join("config.toml"))
}

/// Directory holding scratch downloads for the duration of a run.
pub fn default_temp_dir() -> Result<PathBuf, AppError> {
    Ok(project_root()?.join(".tmp"))
}

/// Anchor a configured path at the project root unless it is already absolute.
pub fn resolve_from_root(path: &Path) -> Result<PathBuf, AppError> {
    if path.is_absolute() { Ok(path.to_path_buf()) } else { Ok(project_root()?.join(path)) }
}

pub fn ensure_dir(dir: &Path) -> Result<(), AppError> {
    fs::create_dir_all(dir).map_err(|err| {
        AppError::config_error(format!("Failed to create directory {}: {err}", dir.display()))
    })
}
