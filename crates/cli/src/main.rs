// Phisherman CLI - headless campaign reconciliation

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use phisherman_recon::{report, EngineConfig, Session, Table};

// =============================================================================
// Exit codes — part of the shell contract, scripts rely on them
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;
/// General error - report assembly or export failure.
pub const EXIT_ERROR: u8 = 1;
/// Usage error - unreadable file, bad arguments.
pub const EXIT_USAGE: u8 = 2;
/// Config file failed to parse or validate.
pub const EXIT_INVALID_CONFIG: u8 = 3;
/// An uploaded file failed to decode or import.
pub const EXIT_IMPORT: u8 = 4;

struct CliError {
    code: u8,
    message: String,
    hint: Option<String>,
}

fn cli_err(code: u8, message: impl Into<String>) -> CliError {
    CliError {
        code,
        message: message.into(),
        hint: None,
    }
}

#[derive(Parser)]
#[command(name = "phisherman")]
#[command(about = "Reconcile phishing-simulation results against an employee roster")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full workflow: roster + campaign extracts -> report
    #[command(after_help = "\
Examples:
  phisherman run --roster employees.xlsx --campaign jan.csv --campaign feb.csv -o report.xlsx
  phisherman run --roster employees.csv --campaign q1.xlsx --json
  phisherman run --roster employees.csv --campaign jan.csv --config phisherman.toml")]
    Run {
        /// Employee roster file (CSV or Excel)
        #[arg(long)]
        roster: PathBuf,

        /// Campaign extract file; repeatable, consolidated in upload order
        #[arg(long = "campaign")]
        campaigns: Vec<PathBuf>,

        /// Engine config (TOML); defaults apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the report workbook to this path
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Print the full report as JSON to stdout
        #[arg(long)]
        json: bool,
    },

    /// Validate an engine config without running
    #[command(after_help = "\
Examples:
  phisherman validate phisherman.toml")]
    Validate {
        /// Path to the TOML config file
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            roster,
            campaigns,
            config,
            output,
            json,
        } => cmd_run(roster, campaigns, config, output, json),
        Commands::Validate { config } => cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {hint}");
            }
            ExitCode::from(err.code)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig, CliError> {
    match path {
        None => Ok(EngineConfig::default()),
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|e| {
                cli_err(
                    EXIT_USAGE,
                    format!("cannot read config {}: {e}", path.display()),
                )
            })?;
            EngineConfig::from_toml(&text).map_err(|e| cli_err(EXIT_INVALID_CONFIG, e.to_string()))
        }
    }
}

/// File stem used as the upload label (and the Period fallback).
fn source_label(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("upload")
        .to_string()
}

fn read_table(path: &Path) -> Result<Table, CliError> {
    let bytes = std::fs::read(path)
        .map_err(|e| cli_err(EXIT_USAGE, format!("cannot read {}: {e}", path.display())))?;
    let filename = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("upload");
    phisherman_io::import_table(&bytes, filename).map_err(|e| cli_err(EXIT_IMPORT, e.to_string()))
}

fn cmd_run(
    roster: PathBuf,
    campaigns: Vec<PathBuf>,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    json: bool,
) -> Result<(), CliError> {
    let config = load_config(config.as_deref())?;
    let mut session = Session::new(config);

    // Decode everything up front: one bad file fails the whole run before
    // any report can be produced from a partial set.
    let roster_table = read_table(&roster)?;
    let mut campaign_tables = Vec::with_capacity(campaigns.len());
    for path in &campaigns {
        campaign_tables.push((read_table(path)?, source_label(path), path));
    }

    let employees = session
        .load_roster(&roster_table, &source_label(&roster))
        .map_err(|e| cli_err(EXIT_IMPORT, format!("{}: {e}", roster.display())))?;
    eprintln!("roster: {employees} employees");

    for (table, label, path) in &campaign_tables {
        let batch = session
            .add_campaign(table, label)
            .map_err(|e| cli_err(EXIT_IMPORT, format!("{}: {e}", path.display())))?;
        eprintln!(
            "campaign '{}': {} rows, period {}",
            batch.source,
            batch.records.len(),
            batch.period,
        );
    }

    let rpt = session
        .report()
        .map_err(|e| cli_err(EXIT_ERROR, e.to_string()))?;

    eprintln!(
        "report: {} matched, {} unmatched, {} period(s), {} at-risk employee(s)",
        rpt.matched.len(),
        rpt.unmatched.len(),
        rpt.consolidation.periods.len(),
        rpt.consolidation.rows.iter().filter(|r| r.risk_count > 0).count(),
    );

    if json {
        let json_str = serde_json::to_string_pretty(&rpt)
            .map_err(|e| cli_err(EXIT_ERROR, format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    }

    if let Some(ref path) = output {
        let sheets = report::export_sheets(&rpt);
        phisherman_io::xlsx::export_to_path(&sheets, path)
            .map_err(|e| cli_err(EXIT_ERROR, format!("cannot write {}: {e}", path.display())))?;
        eprintln!("wrote {}", path.display());
    }

    Ok(())
}

fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let text = std::fs::read_to_string(&config_path)
        .map_err(|e| cli_err(EXIT_USAGE, format!("cannot read config: {e}")))?;

    match EngineConfig::from_toml(&text) {
        Ok(config) => {
            eprintln!(
                "valid: roster key '{}', campaign key '{}', {} risky status(es)",
                config.roster.key_column,
                config.campaign.key_column,
                config.risk.statuses.len(),
            );
            Ok(())
        }
        Err(e) => Err(cli_err(EXIT_INVALID_CONFIG, e.to_string())),
    }
}
