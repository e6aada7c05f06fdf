use std::fs;
use std::path::PathBuf;

use bank_ledger_rs::{
    BatchOrchestrator, ExtractConfig,
    batch::collect_inputs,
    errors::{StatementParseError, StatementResult},
    output::{OutputFormat, write_to_path},
};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "bank_ledger_rs=info,bank_ledger=info";

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Fmt {
    Xlsx,
    Csv,
    Json,
}

impl From<Fmt> for OutputFormat {
    fn from(fmt: Fmt) -> Self {
        match fmt {
            Fmt::Xlsx => OutputFormat::Xlsx,
            Fmt::Csv => OutputFormat::Csv,
            Fmt::Json => OutputFormat::Json,
        }
    }
}

/// Convert bank statement spreadsheets into a ledger import sheet
#[derive(Parser, Debug)]
#[command(name = "bank-ledger", version, about)]
struct Cli {
    /// Statement files or directories holding them
    #[arg(default_value = "data")]
    inputs: Vec<PathBuf>,

    /// Output file
    #[arg(short = 'o', long = "output", default_value = "output/processed_statement.xlsx")]
    output: PathBuf,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "xlsx")]
    format: Fmt,

    /// JSON file with extraction settings
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Year used when a date has no year
    #[arg(long = "year")]
    year: Option<String>,

    /// Document number prefix for money in
    #[arg(long = "inflow-prefix")]
    inflow_prefix: Option<String>,

    /// Document number prefix for money out
    #[arg(long = "outflow-prefix")]
    outflow_prefix: Option<String>,

    /// Worksheet to read (first sheet by default)
    #[arg(long = "sheet")]
    sheet: Option<String>,

    /// Log every dropped row
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl Cli {
    fn extract_config(&self) -> StatementResult<ExtractConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let content = fs::read_to_string(path)?;
                ExtractConfig::from_json(&content)
                    .map_err(|e| StatementParseError::ParseFailed(format!("config: {}", e)))?
            }
            None => ExtractConfig::default(),
        };

        if let Some(year) = &self.year {
            config.default_year = year.clone();
        }
        if let Some(prefix) = &self.inflow_prefix {
            config.inflow_prefix = prefix.clone();
        }
        if let Some(prefix) = &self.outflow_prefix {
            config.outflow_prefix = prefix.clone();
        }
        if let Some(sheet) = &self.sheet {
            config.sheet_name = Some(sheet.clone());
        }

        Ok(config)
    }

    fn input_paths(&self) -> StatementResult<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for input in &self.inputs {
            if input.is_dir() {
                paths.extend(collect_inputs(input)?);
            } else {
                paths.push(input.clone());
            }
        }
        Ok(paths)
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "bank_ledger_rs=debug,bank_ledger=debug"
    } else {
        DEFAULT_LOG_FILTER
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> StatementResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.extract_config()?;
    let paths = cli.input_paths()?;
    tracing::debug!(files = paths.len(), year = %config.default_year, "starting batch");

    let report = BatchOrchestrator::new(config).run(paths);

    for outcome in &report.outcomes {
        println!("{}", outcome);
    }

    let report = match report.into_result() {
        Ok(report) => report,
        Err(e @ (StatementParseError::NoInputFiles | StatementParseError::NoTransactions)) => {
            println!("{}.", e);
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    println!("\nTransactions per month:");
    for (month, count) in &report.month_summary {
        println!("  {:<10} {}", month.label(), count);
    }

    write_to_path(&cli.output, &report.records, cli.format.into())?;
    println!(
        "\nProcessed {} transactions -> {}",
        report.total(),
        cli.output.display()
    );

    Ok(())
}
