//! Validate command implementation

use crate::config::CliConfig;
use crate::output::{print_json, print_success, print_warning, table_header, table_row, OutputFormat};
use crate::utils::read_file;
use clap::Args;
use colored::*;
use serde::Serialize;
use std::path::PathBuf;
use tensorgate_interfaces::ContractProvider;
use tensorgate_types::{ModelVersion, Result, StatusCode};
use tensorgate_validator::{
    ContractRegistry, StatsSnapshot, ValidationContext, ValidationResult, ValidationStats,
    WireFormat,
};
use tracing::{debug, info};

#[derive(Args)]
pub struct ValidateCommand {
    /// JSON encoded request files
    #[arg(required = true)]
    pub requests: Vec<PathBuf>,

    /// Contract file (defaults to the configured one)
    #[arg(long)]
    pub contracts: Option<PathBuf>,

    /// Wire format of the request files
    #[arg(long)]
    pub request_format: Option<WireFormat>,

    /// Model name, overriding the one carried by each request
    #[arg(short, long)]
    pub model: Option<String>,

    /// Model version, overriding the one carried by each request
    #[arg(long)]
    pub model_version: Option<u64>,

    /// Print outcome counters after the reports
    #[arg(long)]
    pub stats: bool,
}

/// Outcome of one request file
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub request: PathBuf,
    pub model: String,
    pub version: ModelVersion,
    pub format: WireFormat,
    pub status: StatusCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ValidationReport {
    fn new(
        request: PathBuf,
        model: String,
        version: ModelVersion,
        format: WireFormat,
        result: &ValidationResult,
    ) -> Self {
        let (status, details) = match result {
            Ok(outcome) => (outcome.status_code(), None),
            Err(err) => (err.code(), Some(err.details().to_string())),
        };
        Self {
            request,
            model,
            version,
            format,
            status,
            details,
        }
    }

    fn accepted(&self) -> bool {
        self.details.is_none()
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    reports: &'a [ValidationReport],
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<StatsSnapshot>,
}

pub async fn execute(cmd: ValidateCommand, config: CliConfig, format: OutputFormat) -> Result<()> {
    let contracts = cmd.contracts.clone().unwrap_or(config.contracts.path);
    let wire_format = cmd.request_format.unwrap_or(config.contracts.default_format);
    let registry = ContractRegistry::from_file(&contracts).await?;
    info!(
        "Loaded {} contracts from {}",
        registry.len(),
        contracts.display()
    );

    let stats = ValidationStats::new();
    let mut reports = Vec::with_capacity(cmd.requests.len());
    let mut first_rejection = None;

    for path in &cmd.requests {
        let body = read_file(path, "request").await?;
        let request = wire_format.decode_json(&body)?;
        let model = cmd
            .model
            .clone()
            .unwrap_or_else(|| request.model_name().to_string());
        let version = match cmd.model_version {
            Some(version) => ModelVersion(version),
            None => request.model_version()?,
        };

        let contract = registry.resolve(&model, version)?;
        debug!(request = %path.display(), model = %model, version = %contract.version, "Validating request");
        let result = request.validate(&ValidationContext::new(&contract));
        stats.record(&result);

        if let Err(err) = &result {
            first_rejection.get_or_insert_with(|| err.clone());
        }
        reports.push(ValidationReport::new(
            path.clone(),
            model,
            contract.version,
            wire_format,
            &result,
        ));
    }

    let snapshot = cmd.stats.then(|| stats.snapshot());
    match format {
        OutputFormat::Json => print_json(&JsonOutput {
            reports: &reports,
            stats: snapshot,
        })?,
        OutputFormat::Pretty => print_pretty(&reports, snapshot.as_ref()),
    }

    match first_rejection {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn print_pretty(reports: &[ValidationReport], stats: Option<&StatsSnapshot>) {
    let widths = [
        reports
            .iter()
            .map(|r| r.request.display().to_string().len())
            .max()
            .unwrap_or(0)
            .max(7),
        reports.iter().map(|r| r.model.len()).max().unwrap_or(0).max(5),
        7,
        26,
    ];
    println!(
        "{}",
        table_header(&[
            ("REQUEST", widths[0]),
            ("MODEL", widths[1]),
            ("VERSION", widths[2]),
            ("STATUS", widths[3]),
        ])
    );
    for report in reports {
        let request = report.request.display().to_string();
        let version = report.version.to_string();
        let row = table_row(&[
            (request.as_str(), widths[0]),
            (report.model.as_str(), widths[1]),
            (version.as_str(), widths[2]),
            (report.status.as_str(), widths[3]),
        ]);
        if report.accepted() {
            println!("{}", row);
        } else {
            println!("{}", row.red());
        }
        if let Some(details) = &report.details {
            println!("    {}", details.dimmed());
        }
    }

    if let Some(stats) = stats {
        println!();
        println!(
            "{} total, {} accepted, {} signalled, {} rejected",
            stats.total, stats.accepted, stats.signalled, stats.rejected
        );
        for (code, count) in &stats.by_code {
            println!("  {:<26} {}", code.as_str(), count);
        }
    }

    let rejected = reports.iter().filter(|r| !r.accepted()).count();
    if rejected == 0 {
        print_success(&format!("{} request(s) accepted", reports.len()));
    } else {
        print_warning(&format!(
            "{} of {} request(s) rejected",
            rejected,
            reports.len()
        ));
    }
}
