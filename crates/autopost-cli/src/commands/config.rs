//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub fn execute_config(
    args: ConfigArgs,
    config: &Config,
    config_path: Option<&Path>,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            println!("{}", config.to_toml()?);
        }
        ConfigAction::Path => {
            let path = match config_path {
                Some(p) => p.to_path_buf(),
                None => Config::path()?,
            };
            println!("{}", path.display());
        }
        ConfigAction::Init { force } => {
            let path = match config_path {
                Some(p) => p.to_path_buf(),
                None => Config::path()?,
            };
            if path.exists() && !force {
                return Err(CliError::Config(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }
            let written = Config::default().save(Some(&path))?;
            println!(
                "{}",
                formatter.success(&format!("Wrote default configuration to {}", written.display()))
            );
        }
    }
    Ok(())
}
