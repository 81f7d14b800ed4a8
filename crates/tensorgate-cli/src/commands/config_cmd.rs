//! Configuration command implementation

use crate::config::CliConfig;
use crate::output::{print_json, print_success, OutputFormat};
use clap::Args;
use colored::*;
use tensorgate_types::Result;

#[derive(Args)]
pub struct ConfigCommand {
    /// Write the default configuration to this file
    #[arg(long)]
    pub generate: Option<std::path::PathBuf>,
}

pub async fn execute(cmd: ConfigCommand, config: CliConfig, format: OutputFormat) -> Result<()> {
    if let Some(path) = cmd.generate {
        CliConfig::default().save(&path).await?;
        print_success(&format!("Default configuration written to {}", path.display()));
        return Ok(());
    }

    match format {
        OutputFormat::Json => print_json(&config),
        OutputFormat::Pretty => {
            println!("{}", "Current configuration".bold());
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}
