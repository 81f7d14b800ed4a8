//! Contract command implementation

use crate::config::CliConfig;
use crate::output::{print_json, print_success, table_header, table_row, OutputFormat};
use clap::{Args, Subcommand};
use colored::*;
use std::path::PathBuf;
use tensorgate_interfaces::ContractProvider;
use tensorgate_types::{ContractFile, ModelConfigEntry, ModelContract, ModelVersion, Result};
use tensorgate_validator::ContractRegistry;

#[derive(Args)]
pub struct ContractCommand {
    #[command(subcommand)]
    pub action: ContractAction,

    /// Contract file (defaults to the configured one)
    #[arg(long, global = true)]
    pub contracts: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum ContractAction {
    /// List every model version in the contract file
    List,

    /// Show the contract of one model version
    Show {
        /// Model name
        model: String,

        /// Model version, latest when omitted
        #[arg(long)]
        model_version: Option<u64>,
    },

    /// Check that the contract file is well formed
    Check,
}

pub async fn execute(cmd: ContractCommand, config: CliConfig, format: OutputFormat) -> Result<()> {
    let path = cmd.contracts.unwrap_or(config.contracts.path);
    let registry = ContractRegistry::from_file(&path).await?;

    match cmd.action {
        ContractAction::List => list(&registry, format),
        ContractAction::Show {
            model,
            model_version,
        } => {
            let version = model_version.map(ModelVersion).unwrap_or_default();
            let contract = registry.resolve(&model, version)?;
            show(&contract, format)
        }
        ContractAction::Check => {
            print_success(&format!(
                "{} model version(s) in {} are well formed",
                registry.len(),
                path.display()
            ));
            Ok(())
        }
    }
}

fn list(registry: &ContractRegistry, format: OutputFormat) -> Result<()> {
    let entries = registry.list();
    if format == OutputFormat::Json {
        let models: Vec<_> = entries
            .iter()
            .map(|(name, version)| serde_json::json!({ "name": name.as_str(), "version": version }))
            .collect();
        return print_json(&models);
    }

    if entries.is_empty() {
        println!("No models declared.");
        return Ok(());
    }

    let width = entries
        .iter()
        .map(|(name, _)| name.as_str().len())
        .max()
        .unwrap_or(0)
        .max(4);
    println!(
        "{}",
        table_header(&[("NAME", width), ("VERSION", 7), ("INPUTS", 6)])
    );
    for (name, version) in &entries {
        let inputs = registry
            .resolve(name.as_str(), *version)
            .map(|c| c.inputs.len())
            .unwrap_or(0);
        let version = version.to_string();
        let inputs = inputs.to_string();
        println!(
            "{}",
            table_row(&[
                (name.as_str(), width),
                (version.as_str(), 7),
                (inputs.as_str(), 6),
            ])
        );
    }
    Ok(())
}

fn show(contract: &ModelContract, format: OutputFormat) -> Result<()> {
    let entry = ModelConfigEntry::from(contract);
    if format == OutputFormat::Json {
        return print_json(&entry);
    }

    println!(
        "{} {} version {}",
        "Model".bold(),
        contract.name.as_str().cyan(),
        contract.version.to_string().cyan()
    );
    println!("  Batching mode: {}", contract.batching_mode);
    println!();
    let file = ContractFile {
        models: vec![entry],
    };
    print!("{}", file.to_toml_string()?);
    Ok(())
}
