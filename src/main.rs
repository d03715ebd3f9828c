//! Property Analyzer CLI
//!
//! Command-line interface for running cash-flow projections and summarizing market datasets

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use property_analyzer::aggregation::{summarize, RecordSet, SummaryKind};
use property_analyzer::assumptions::{load_settings_or_default, DEFAULT_SETTINGS_PATH};
use property_analyzer::projection::{IncomeMode, ProjectionConfig, ProjectionResult};
use property_analyzer::property::{load_properties, Property};
use property_analyzer::{AnalysisResult, ScenarioRunner};

#[derive(Parser)]
#[command(name = "property-analyzer", version, about = "Property investment projections and market statistics")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Project monthly cash flows for every property in a CSV file
    Project {
        /// Properties CSV
        #[arg(long)]
        properties: PathBuf,
        #[command(flatten)]
        loans: LoanArgs,
        #[arg(long, value_enum, default_value_t = ModeArg::WholeUnit)]
        mode: ModeArg,
        /// Output CSV
        #[arg(long, default_value = "projection_output.csv")]
        output: PathBuf,
    },
    /// Compare all income modes for one property
    Compare {
        #[arg(long)]
        properties: PathBuf,
        /// Property id to compare
        #[arg(long)]
        id: u32,
        #[command(flatten)]
        loans: LoanArgs,
    },
    /// Summarize a market dataset (CSV, or JSON array of objects)
    Summarize {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, value_enum)]
        kind: KindArg,
        /// Write the JSON summary here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct LoanArgs {
    /// Settings JSON; defaults apply when the file is absent
    #[arg(long, default_value = DEFAULT_SETTINGS_PATH)]
    settings: PathBuf,
    /// First loan as a percentage of the valuation price
    #[arg(long, default_value_t = 90.0)]
    loan1: f64,
    /// Second loan as a percentage of the valuation price
    #[arg(long, default_value_t = 100.0)]
    loan2: f64,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    WholeUnit,
    CoLiving,
    SelfManage,
    Airbnb,
}

impl From<ModeArg> for IncomeMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::WholeUnit => IncomeMode::WholeUnit,
            ModeArg::CoLiving => IncomeMode::CoLiving,
            ModeArg::SelfManage => IncomeMode::SelfManage,
            ModeArg::Airbnb => IncomeMode::Airbnb,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Rentals,
    AskingPrices,
    Transactions,
    Airbnb,
}

impl From<KindArg> for SummaryKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Rentals => SummaryKind::RentalListings,
            KindArg::AskingPrices => SummaryKind::AskingPrices,
            KindArg::Transactions => SummaryKind::Transactions,
            KindArg::Airbnb => SummaryKind::AirbnbListings,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Command::Project {
            properties,
            loans,
            mode,
            output,
        } => run_project(&properties, &loans, mode.into(), &output),
        Command::Compare {
            properties,
            id,
            loans,
        } => run_compare(&properties, id, &loans),
        Command::Summarize {
            input,
            kind,
            output,
        } => run_summarize(&input, kind.into(), output.as_deref()),
    }
}

fn load_inputs(properties_path: &Path, loans: &LoanArgs) -> Result<(ScenarioRunner, Vec<Property>)> {
    let settings = load_settings_or_default(&loans.settings)
        .with_context(|| format!("reading settings from {}", loans.settings.display()))?;
    let properties = load_properties(properties_path, &settings)
        .with_context(|| format!("reading properties from {}", properties_path.display()))?;
    Ok((ScenarioRunner::new(settings), properties))
}

fn run_project(properties_path: &Path, loans: &LoanArgs, mode: IncomeMode, output: &Path) -> Result<()> {
    let (runner, properties) = load_inputs(properties_path, loans)?;
    let config = ProjectionConfig::new(mode, loans.loan1, loans.loan2);
    let results = runner.run_batch(&properties, config);

    let file = File::create(output).with_context(|| format!("creating {}", output.display()))?;
    let projected = write_projection_csv(BufWriter::new(file), mode, &properties, results)?;

    info!("Wrote {} projections to {}", projected, output.display());
    println!(
        "Projected {} of {} properties ({}) -> {}",
        projected,
        properties.len(),
        mode.as_str(),
        output.display()
    );
    Ok(())
}

const STANDARD_HEADER: [&str; 11] = [
    "Id",
    "Name",
    "Layout",
    "NetPrice",
    "Scenario",
    "LoanAmount",
    "Commitment",
    "TotalCommitment",
    "Cashflow",
    "CashflowExclPrincipal",
    "Cashback",
];

const AIRBNB_HEADER: [&str; 12] = [
    "Id",
    "Name",
    "Layout",
    "NetPrice",
    "TotalCommitmentAtNett",
    "Occupancy",
    "TotalIncome",
    "OperatorFee",
    "CashflowNett",
    "CashflowLoan1",
    "CashflowLoan2",
    "CashflowLppsa",
];

fn money(value: f64) -> String {
    format!("{:.2}", value)
}

/// Write one CSV row per scenario (or occupancy tier) and return how many
/// properties were projected. Failed properties are reported and skipped.
fn write_projection_csv<W: Write>(
    out: W,
    mode: IncomeMode,
    properties: &[Property],
    results: Vec<AnalysisResult<ProjectionResult>>,
) -> Result<usize> {
    let mut writer = csv::Writer::from_writer(out);
    match mode {
        IncomeMode::Airbnb => writer.write_record(AIRBNB_HEADER)?,
        _ => writer.write_record(STANDARD_HEADER)?,
    }

    let mut projected = 0;
    for (property, result) in properties.iter().zip(results) {
        let id = property.id.to_string();
        match result {
            Ok(ProjectionResult::Standard(calc)) => {
                for (label, scenario) in [
                    ("Nett", &calc.nett),
                    ("Loan1", &calc.loan1),
                    ("Loan2", &calc.loan2),
                    ("LPPSA", &calc.lppsa),
                ] {
                    writer.write_record([
                        id.clone(),
                        property.name.clone(),
                        property.bedrooms_type.clone(),
                        money(calc.prices.net_price),
                        label.to_string(),
                        money(scenario.loan_amount),
                        money(scenario.commitment),
                        money(scenario.total_commitment_monthly),
                        money(scenario.cashflow),
                        money(scenario.cashflow_excluding_principal),
                        money(scenario.cashback),
                    ])?;
                }
                projected += 1;
            }
            Ok(ProjectionResult::Airbnb(calc)) => {
                for (label, tier) in [
                    ("Current", &calc.current),
                    ("Best", &calc.best),
                    ("Worst", &calc.worst),
                ] {
                    writer.write_record([
                        id.clone(),
                        property.name.clone(),
                        property.bedrooms_type.clone(),
                        money(calc.prices.net_price),
                        money(calc.total_commitment_at_nett),
                        format!("{} ({:.0}%)", label, tier.occupancy_percent),
                        money(tier.total_income),
                        money(tier.operator_fee),
                        money(tier.cashflow_nett),
                        money(tier.cashflow_loan1),
                        money(tier.cashflow_loan2),
                        money(tier.cashflow_lppsa),
                    ])?;
                }
                projected += 1;
            }
            Err(err) => eprintln!("Skipping property {}: {}", property.id, err),
        }
    }
    writer.flush()?;
    Ok(projected)
}

fn run_compare(properties_path: &Path, id: u32, loans: &LoanArgs) -> Result<()> {
    let (runner, properties) = load_inputs(properties_path, loans)?;
    let Some(property) = properties.iter().find(|p| p.id == id) else {
        bail!("property {} not found in {}", id, properties_path.display());
    };

    let results = runner.run_all_modes(property, loans.loan1, loans.loan2)?;

    println!("Property {}: {} {}", property.id, property.name, property.bedrooms_type);
    println!("  Net price: {:.2}", results[0].net_price());
    println!("  Nett installment: {:.2}", results[0].loans().nett.installment());
    println!();
    println!("{:<12} {:>16}", "Mode", "Nett cashflow");
    println!("{}", "-".repeat(29));
    for result in &results {
        println!("{:<12} {:>16.2}", result.mode().as_str(), result.headline_cashflow());
    }
    Ok(())
}

fn run_summarize(input: &Path, kind: SummaryKind, output: Option<&Path>) -> Result<()> {
    let is_json = input
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let records = if is_json {
        let json = fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
        RecordSet::from_json_str(&json)?
    } else {
        let file = File::open(input).with_context(|| format!("opening {}", input.display()))?;
        RecordSet::from_csv_reader(file)?
    };
    info!("Read {} records ({} columns) from {}", records.len(), records.columns.len(), input.display());

    let summary = summarize(&records, kind)?;
    info!(
        "Summarized {} groups from {} rows ({} excluded)",
        summary.groups.len(),
        summary.rows_used,
        summary.rows_excluded()
    );

    let json = serde_json::to_string_pretty(&summary)?;
    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            println!("Summary written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
