mod commands;
mod logging;

pub use commands::{ConfigCommand, RunOptions, handle_config, handle_run, handle_sources};
pub use logging::init_logging;
