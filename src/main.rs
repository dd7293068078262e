use clap::{Parser, Subcommand};
use model_health::cli::{self, ConfigCommand, RunOptions};
use model_health::error::AppError;

#[derive(Parser)]
#[command(name = "model-health")]
#[command(version)]
#[command(about = "Daily health check for hosted text, audio, and OCR inference endpoints")]
#[command(long_about = None)]
struct Cli {
    /// Override log level (trace/debug/info/warn/error)
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe every model once and write the daily report
    #[clap(visible_alias = "r")]
    Run(RunOptions),
    /// List the candidate sample inputs for each model
    #[clap(visible_alias = "src")]
    Sources,
    /// Manage configuration
    #[clap(visible_alias = "cf")]
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the current configuration file contents
    Show,
    /// Print the configuration file path
    Path,
    /// Reset configuration file to default values
    Reset,
    /// Set a dotted configuration key, e.g. `timeouts.fetch_secs 30`
    Set { key: String, value: String },
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = cli::init_logging(cli.log_level.as_deref()) {
        eprintln!("Warning: {err}");
    }

    let result: Result<(), AppError> = match cli.command {
        Commands::Run(options) => cli::handle_run(options),
        Commands::Sources => cli::handle_sources(),
        Commands::Config(config_command) => cli::handle_config(map_config_command(config_command)),
    };

    if let Err(err) = result {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn map_config_command(cmd: ConfigCommands) -> ConfigCommand {
    match cmd {
        ConfigCommands::Show => ConfigCommand::Show,
        ConfigCommands::Path => ConfigCommand::Path,
        ConfigCommands::Reset => ConfigCommand::Reset,
        ConfigCommands::Set { key, value } => ConfigCommand::Set { key, value },
    }
}
