use crate::core::config;
use crate::core::context::RunSettings;
use crate::core::env;
use crate::core::paths;
use crate::core::probe::{RandomPicker, SourcePicker};
use crate::core::report::RunMetadata;
use crate::core::runner::{self, ProbeSet};
use crate::error::AppError;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Default, Args)]
pub struct RunOptions {
    /// Directory for the daily report (defaults to `output.dir` from the config)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
    /// Scratch directory for downloaded samples (defaults to `<project>/.tmp`)
    #[arg(long)]
    pub temp_dir: Option<PathBuf>,
    /// Seed the sample picker so the same inputs are chosen on every run
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn handle_run(options: RunOptions) -> Result<(), AppError> {
    let api_key = env::api_key();
    let cfg = config::load_config()?;

    let output_dir = match options.output_dir {
        Some(dir) => paths::resolve_from_root(&dir)?,
        None => paths::resolve_from_root(&cfg.output.dir)?,
    };
    let temp_dir = match options.temp_dir {
        Some(dir) => paths::resolve_from_root(&dir)?,
        None => paths::default_temp_dir()?,
    };

    let mut picker: Box<dyn SourcePicker> = match options.seed {
        Some(seed) => {
            info!(seed, "using seeded sample selection");
            Box::new(RandomPicker::seeded(seed))
        }
        None => Box::new(RandomPicker::from_entropy()),
    };

    let outcome = runner::execute(
        api_key,
        RunSettings { config: cfg, output_dir, temp_dir },
        RunMetadata::now(),
        &ProbeSet::standard(),
        picker.as_mut(),
    )?;

    println!("{}", outcome.persisted.rendered);
    Ok(())
}
