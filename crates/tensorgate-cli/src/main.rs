//! TensorGate CLI - check inference requests against model contracts

use clap::{Parser, Subcommand};
use colored::*;
use std::process;
use tensorgate_cli::{
    commands::*,
    config::CliConfig,
    output::{print_error, OutputFormat},
    utils::setup_logging,
};

#[derive(Parser)]
#[command(name = "tensorgate")]
#[command(about = "TensorGate inference request validator")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "tensorgate.toml")]
    config: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (only errors)
    #[arg(short, long)]
    quiet: bool,

    /// Output format
    #[arg(long, default_value = "pretty")]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate request files against model contracts
    Validate(ValidateCommand),

    /// Inspect model contracts
    Contract(ContractCommand),

    /// Show or generate configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match CliConfig::load(&cli.config).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} Failed to load config: {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    };

    if let Err(e) = setup_logging(cli.verbose, cli.quiet, &config.logging) {
        eprintln!("{} Failed to setup logging: {}", "Error:".red().bold(), e);
        process::exit(1);
    }

    let result = match cli.command {
        Commands::Validate(cmd) => validate::execute(cmd, config, cli.format).await,
        Commands::Contract(cmd) => contract::execute(cmd, config, cli.format).await,
        Commands::Config(cmd) => config_cmd::execute(cmd, config, cli.format).await,
    };

    if let Err(e) = result {
        print_error(&e);
        process::exit(if e.is_client_error() { 2 } else { 1 });
    }
}
