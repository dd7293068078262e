use crate::core::config;
use crate::core::paths;
use crate::error::AppError;
use std::fs;

/// Subcommands supported by `model-health config`.
#[derive(Debug)]
pub enum ConfigCommand {
    Show,
    Path,
    Reset,
    Set { key: String, value: String },
}

pub fn handle_config(command: ConfigCommand) -> Result<(), AppError> {
    match command {
        ConfigCommand::Show => show_config(),
        ConfigCommand::Path => print_config_path(),
        ConfigCommand::Reset => reset_config(),
        ConfigCommand::Set { key, value } => set_config_value(key, value),
    }
}

fn show_config() -> Result<(), AppError> {
    let _ = config::load_config_document()?;
    let path = paths::user_config_file()?;
    let contents = fs::read_to_string(&path)?;
    print!("{}", contents);
    Ok(())
}

fn print_config_path() -> Result<(), AppError> {
    let path = paths::user_config_file()?;
    println!("{}", path.display());
    Ok(())
}

fn reset_config() -> Result<(), AppError> {
    config::reset_config()?;
    println!("Configuration reset to defaults");
    Ok(())
}

fn set_config_value(key: String, value: String) -> Result<(), AppError> {
    let mut document = config::load_config_document()?;
    let segments: Vec<String> = key
        .split('.')
        .map(|segment| segment.trim().to_string())
        .filter(|segment| !segment.is_empty())
        .collect();
    if segments.is_empty() {
        return Err(AppError::config_error("Configuration key must not be empty"));
    }
    let refs: Vec<&str> = segments.iter().map(|segment| segment.as_str()).collect();
    let inferred = config::infer_toml_edit_value(&value);
    config::set_document_value(&mut document, &refs, inferred)?;
    // A rejected edit must leave the file on disk untouched.
    config::validate_document(&document)?;
    config::save_config_document(&document)?;

    println!("Updated configuration key '{}'", segments.join("."));
    Ok(())
}
