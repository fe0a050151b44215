//! AutoPost CLI - Draft LinkedIn posts from your own corpus.

use autopost_cli::cli::ConfigAction;
use autopost_cli::commands;
use autopost_cli::{Cli, Command, Config, Formatter};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    // Log to stderr so command output stays pipeable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Pick up GROQ_API_KEY and friends from .env when present
    dotenvy::dotenv().ok();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> autopost_cli::Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    // `config init` must work before any config file exists
    let config = match &cli.command {
        Command::Config(args) if matches!(args.action, ConfigAction::Init { .. }) => Config::default(),
        _ => Config::load(config_path)?,
    };

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Process(args) => {
            let api_key = config.api_key(cli.api_key.as_deref())?;
            commands::execute_process(args, &config, &api_key, &formatter)?;
        }
        Command::Generate(args) => {
            let api_key = config.api_key(cli.api_key.as_deref())?;
            commands::execute_generate(args, &config, &api_key, &formatter)?;
        }
        Command::Tags(args) => {
            commands::execute_tags(args, &config, &formatter)?;
        }
        Command::Config(args) => {
            commands::execute_config(args, &config, config_path, &formatter)?;
        }
    }

    Ok(())
}
