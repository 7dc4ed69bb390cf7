//! Re-identification risk assessment tool.
//!
//! Reads a CSV extract of survey microdata, finds the columns that act as
//! quasi-identifiers and reports k-anonymity, record-level risk, a regional
//! breakdown and mitigation recommendations.
//!
//! # Privacy Guarantees
//! - Offline operation, the input never leaves the machine
//! - Logs carry column names and counts, never cell values
//! - Reports expose cell values only as region labels

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use riskscope::{OutputFormat, RiskReport, load_config, load_csv};
use riskscope_core::{
    Dataset, OverallRiskStrategy, RiskAnalyzer, RiskConfig, init_logging,
    risk::select_quasi_identifiers,
};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "riskscope")]
#[command(about = "Re-identification risk assessment for survey microdata")]
#[command(version)]
#[command(long_about = "
riskscope - Disclosure risk assessment for released microdata

Scores how easily individual records in a CSV extract could be singled out
by combining quasi-identifiers such as age, district and occupation.

REPORTED METRICS:
- k-anonymity over the selected quasi-identifiers
- Unique and high-risk record counts
- Overall risk score and class-size distribution
- Per-region risk breakdown
- Ordered mitigation recommendations

EXAMPLES:
  riskscope assess survey.csv
  riskscope assess survey.csv --qi Age,District,Occupation --threshold 3
  riskscope assess survey.csv --format markdown --output report.md
  riskscope profile survey.csv
")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Assess re-identification risk of a CSV dataset
    Assess(AssessArgs),
    /// Rank candidate quasi-identifier columns without assessing
    Profile(ProfileArgs),
}

#[derive(Args)]
pub struct AssessArgs {
    /// Input CSV file
    #[arg(help = "CSV file with a header row")]
    pub input: PathBuf,

    /// Quasi-identifier columns
    #[arg(
        long = "qi",
        value_delimiter = ',',
        help = "Comma-separated quasi-identifier columns (auto-selected when omitted)"
    )]
    pub quasi_identifiers: Vec<String>,

    /// Configuration file
    #[arg(long, help = "JSON file with risk configuration")]
    pub config: Option<PathBuf>,

    /// Risk threshold
    #[arg(long, help = "Classes smaller than this are high risk (default 5)")]
    pub threshold: Option<usize>,

    /// Recommendation cap
    #[arg(long, help = "Maximum number of recommendations (default 8)")]
    pub max_recommendations: Option<usize>,

    /// Overall risk formula
    #[arg(long, value_enum, help = "Overall risk formula")]
    pub risk_formula: Option<RiskFormula>,

    /// Geographic breakdown size
    #[arg(long, help = "Number of regions in the geographic breakdown (default 10)")]
    pub geo_top: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Output file path
    #[arg(short, long, help = "Output file path (stdout when omitted)")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ProfileArgs {
    /// Input CSV file
    #[arg(help = "CSV file with a header row")]
    pub input: PathBuf,

    /// Output file path
    #[arg(short, long, help = "Output file path (stdout when omitted)")]
    pub output: Option<PathBuf>,
}

/// Overall risk formula as spelled on the command line.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum RiskFormula {
    /// High-risk rows over total rows
    Ratio,
    /// Ratio plus a penalty for unique records
    UniquenessPenalized,
}

impl From<RiskFormula> for OverallRiskStrategy {
    fn from(formula: RiskFormula) -> Self {
        match formula {
            RiskFormula::Ratio => OverallRiskStrategy::Ratio,
            RiskFormula::UniquenessPenalized => OverallRiskStrategy::UniquenessPenalized,
        }
    }
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Increase verbosity
    #[arg(
        short,
        long,
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv, -vvv)"
    )]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true, help = "Suppress all output except errors")]
    pub quiet: bool,

    /// JSON logs
    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.global.verbose, cli.global.quiet, cli.global.log_json)?;

    match &cli.command {
        Command::Assess(args) => assess(args),
        Command::Profile(args) => profile(args),
    }
}

/// Runs the full assessment and writes the report.
fn assess(args: &AssessArgs) -> Result<()> {
    let config = build_config(args)?;
    let analyzer = RiskAnalyzer::new(config).context("Invalid risk configuration")?;
    let dataset = load_dataset(&args.input)?;

    let (profiles, metrics) = if args.quasi_identifiers.is_empty() {
        analyzer.analyze_auto(&dataset)?
    } else {
        (
            Vec::new(),
            analyzer.analyze(&dataset, &args.quasi_identifiers)?,
        )
    };

    info!(
        "k-anonymity {} over {} quasi-identifiers, {} high-risk records",
        metrics.k_anonymity,
        metrics.vulnerable_fields.len(),
        metrics.high_risk_records
    );
    if metrics.k_anonymity < analyzer.config().risk_threshold && !dataset.is_empty() {
        warn!(
            "Dataset is below the k={} threshold",
            analyzer.config().risk_threshold
        );
    }

    let report = RiskReport::new(
        args.input.display().to_string(),
        &dataset,
        analyzer.config().clone(),
        profiles,
        metrics,
    );
    let rendered = report.render(args.format)?;
    write_output(&rendered, args.output.as_deref())
}

/// Ranks candidate columns and writes them as JSON.
fn profile(args: &ProfileArgs) -> Result<()> {
    let dataset = load_dataset(&args.input)?;
    let profiles = RiskAnalyzer::with_defaults().profile(&dataset);
    let selection = select_quasi_identifiers(&profiles);

    info!(
        "{} candidate columns, {} suggested as quasi-identifiers",
        profiles.len(),
        selection.len()
    );

    let summary = serde_json::json!({
        "source": args.input.display().to_string(),
        "profiles": profiles,
        "suggested_quasi_identifiers": selection,
    });
    let rendered =
        serde_json::to_string_pretty(&summary).context("Failed to serialize column profiles")?;
    write_output(&rendered, args.output.as_deref())
}

/// Merges the config file, if any, with command-line overrides.
fn build_config(args: &AssessArgs) -> Result<RiskConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => RiskConfig::new(),
    };

    if let Some(threshold) = args.threshold {
        config = config.with_risk_threshold(threshold);
    }
    if let Some(cap) = args.max_recommendations {
        config = config.with_max_recommendations(cap);
    }
    if let Some(formula) = args.risk_formula {
        config = config.with_overall_risk_strategy(formula.into());
    }
    if let Some(top_n) = args.geo_top {
        config = config.with_geographic_top_n(top_n);
    }

    Ok(config)
}

fn load_dataset(path: &Path) -> Result<Dataset> {
    let dataset =
        load_csv(path).with_context(|| format!("Failed to load dataset from {}", path.display()))?;
    if dataset.is_empty() {
        warn!("{} contains no data rows", path.display());
    }
    Ok(dataset)
}

/// Writes rendered output to a file, or stdout when no path is given.
fn write_output(rendered: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}
