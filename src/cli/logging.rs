use crate::core::config::{self, DEFAULT_LOG_LEVEL};
use crate::error::AppError;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr subscriber. Precedence: `RUST_LOG`, then `--log-level`, then the
/// `[logging] level` config key. Stdout stays reserved for command output.
pub fn init_logging(level_override: Option<&str>) -> Result<(), AppError> {
    let level = match level_override {
        Some(level) => level.to_string(),
        None => configured_level(),
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let stderr_layer =
        tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init()
        .map_err(|err| AppError::config_error(format!("Failed to init logging: {err}")))
}

/// Level from an existing config file. Logging setup never creates the file.
fn configured_level() -> String {
    match config::load_existing_config() {
        Ok(Some(cfg)) => cfg.logging.level,
        _ => DEFAULT_LOG_LEVEL.to_string(),
    }
}
