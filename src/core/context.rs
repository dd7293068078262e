use crate::core::config::Config;
use crate::core::env::API_KEY_VAR;
use crate::core::paths;
use crate::core::report::RunMetadata;
use crate::error::AppError;
use std::path::{Path, PathBuf};

/// Everything a run needs besides the credential, resolved up front by the caller.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub config: Config,
    pub output_dir: PathBuf,
    pub temp_dir: PathBuf,
}

/// Read-only state shared by every probe in one run.
#[derive(Debug)]
pub struct RunContext {
    api_key: String,
    config: Config,
    output_dir: PathBuf,
    temp_dir: PathBuf,
    metadata: RunMetadata,
}

impl RunContext {
    /// Validate the credential and prepare directories. This is the only step whose failure
    /// aborts the whole run.
    pub fn initialize(
        api_key: Option<String>,
        settings: RunSettings,
        metadata: RunMetadata,
    ) -> Result<Self, AppError> {
        let api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| AppError::config_error(format!("{API_KEY_VAR} not set")))?;

        let RunSettings { config, output_dir, temp_dir } = settings;
        paths::ensure_dir(&output_dir)?;
        paths::ensure_dir(&temp_dir)?;

        Ok(Self { api_key, config, output_dir, temp_dir, metadata })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    pub fn metadata(&self) -> &RunMetadata {
        &self.metadata
    }
}
