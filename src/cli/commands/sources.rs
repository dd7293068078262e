use crate::core::config;
use crate::core::report::{AUDIO_MODEL_KEY, IMAGE_MODEL_KEY, TEXT_MODEL_KEY};
use crate::error::AppError;

pub fn handle_sources() -> Result<(), AppError> {
    let cfg = config::load_config()?;
    for (model, sources) in [
        (TEXT_MODEL_KEY, &cfg.text.sources),
        (AUDIO_MODEL_KEY, &cfg.audio.sources),
        (IMAGE_MODEL_KEY, &cfg.image.sources),
    ] {
        println!("• {model}:");
        if sources.is_empty() {
            println!("    (none configured)");
        }
        for source in sources {
            println!("    {source}");
        }
    }
    Ok(())
}
