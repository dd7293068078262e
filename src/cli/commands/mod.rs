mod config;
mod run;
mod sources;

pub use config::{ConfigCommand, handle_config};
pub use run::{RunOptions, handle_run};
pub use sources::handle_sources;
