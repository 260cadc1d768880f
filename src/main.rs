//! RJ Cashflow CLI
//!
//! Runs a cash flow projection for a reorganization plan and writes the
//! period table to CSV

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;

use rj_cashflow::assumptions::{load_periods, Granularity};
use rj_cashflow::creditors::{load_creditors, MergeMode};
use rj_cashflow::projection::valuation::irr;
use rj_cashflow::{ScenarioConfig, ScenarioOutcome, ScenarioRunner};

/// Cash flow simulator for judicial reorganization plans
#[derive(Debug, Parser)]
#[command(name = "rj-cashflow", version, about)]
struct Cli {
    /// Scenario JSON file; omitted fields fall back to the reference plan
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Horizon in years
    #[arg(long)]
    years: Option<u32>,

    /// Revenue growth per period (fraction, e.g. 0.01)
    #[arg(long)]
    growth: Option<f64>,

    /// Project annual periods instead of monthly ones
    #[arg(long)]
    annual: bool,

    /// Per-period assumptions CSV (replaces the scenario inputs)
    #[arg(long)]
    periods_csv: Option<PathBuf>,

    /// Creditor classes CSV (replaces the scenario creditors)
    #[arg(long)]
    creditors_csv: Option<PathBuf>,

    /// Project without any creditor payments
    #[arg(long, conflicts_with = "creditors_csv")]
    no_creditors: bool,

    /// Repay creditor classes one after another instead of together
    #[arg(long)]
    sequential: bool,

    /// Effective annual discount rate for the NPV of the series
    #[arg(long)]
    discount_rate: Option<f64>,

    /// Date of period 0 (YYYY-MM-DD)
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Comma-separated growth rates to compare (e.g. 0,0.005,0.01)
    #[arg(long, value_delimiter = ',')]
    sensitivity: Vec<f64>,

    /// Output CSV path for the period table
    #[arg(long, default_value = "cashflow_projection.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = build_config(&cli)?;
    let runner = match &cli.periods_csv {
        Some(path) => {
            let periods = load_periods(path)
                .with_context(|| format!("failed to load periods from {}", path.display()))?;
            ScenarioRunner::with_periods(periods)
        }
        None => ScenarioRunner::new(),
    };

    println!("RJ Cashflow v{}", env!("CARGO_PKG_VERSION"));
    println!("==================\n");

    let outcome = runner.run(&config).context("projection rejected")?;

    print_payments(&outcome);
    print_table(&outcome);
    print_summary(&config, &outcome);

    write_csv(&cli.output, &outcome)?;
    println!("\nFull results written to: {}", cli.output.display());

    if !cli.sensitivity.is_empty() {
        let outcomes = runner
            .run_growth_sensitivity(&config, &cli.sensitivity)
            .context("sensitivity run rejected")?;

        println!("\nGrowth sensitivity:");
        println!("{:>10} {:>18} {:>18} {:>8}", "Growth", "TotalCF", "MinCumulative", "NegPer");
        for o in &outcomes {
            println!(
                "{:>10.4} {:>18.2} {:>18.2} {:>8}",
                o.growth, o.summary.total_cash_flow, o.summary.min_cumulative_cash, o.summary.negative_periods
            );
        }
    }

    Ok(())
}

fn build_config(cli: &Cli) -> Result<ScenarioConfig> {
    let mut config = match &cli.scenario {
        Some(path) => ScenarioConfig::from_json_path(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?,
        None => ScenarioConfig::reference(),
    };

    if let Some(years) = cli.years {
        config.years = years;
    }
    if let Some(growth) = cli.growth {
        config.growth = growth;
    }
    if cli.annual {
        config.granularity = Granularity::Annual;
    }
    if cli.sequential {
        config.merge_mode = MergeMode::Sequential;
    }
    if let Some(rate) = cli.discount_rate {
        config.discount_rate = Some(rate);
    }
    if let Some(date) = cli.start_date {
        config.start_date = Some(date);
    }
    if cli.no_creditors {
        config.creditors.clear();
    }
    if let Some(path) = &cli.creditors_csv {
        config.creditors = load_creditors(path)
            .with_context(|| format!("failed to load creditors from {}", path.display()))?;
    }

    Ok(config)
}

fn print_payments(outcome: &ScenarioOutcome) {
    if outcome.class_payments.is_empty() {
        println!("No creditor classes.\n");
        return;
    }

    println!("Creditor payments (monthly):");
    for class in &outcome.class_payments {
        println!(
            "  {:<20} {:>12.2} x {:>3} = {:>14.2}",
            class.name,
            class.payment,
            class.installments,
            class.total()
        );
    }
    println!("  Obligation schedule: {} periods\n", outcome.obligations.len());
}

fn print_table(outcome: &ScenarioOutcome) {
    let rows = &outcome.projection.rows;

    println!(
        "{:>6} {:>16} {:>14} {:>14} {:>14} {:>12} {:>16} {:>16}",
        "Period", "Revenue", "NetResult", "OperatingCF", "Investment", "Obligation", "TotalCF", "Cumulative"
    );
    println!("{}", "-".repeat(120));

    for row in rows.iter().take(24) {
        println!(
            "{:>6} {:>16.2} {:>14.2} {:>14.2} {:>14.2} {:>12.2} {:>16.2} {:>16.2}",
            row.period,
            row.revenue,
            row.net_result,
            row.operating_cash_flow,
            row.investment,
            row.obligation,
            row.total_cash_flow,
            row.cumulative_cash_flow,
        );
    }

    if rows.len() > 24 {
        println!("... ({} more periods)", rows.len() - 24);
    }
}

fn print_summary(config: &ScenarioConfig, outcome: &ScenarioOutcome) {
    let summary = &outcome.summary;

    println!("\nSummary:");
    println!("  Periods: {}", summary.periods);
    println!("  Total Revenue: {:.2}", summary.total_revenue);
    println!("  Total Obligations: {:.2}", summary.total_obligations);
    println!("  Total Cash Flow: {:.2}", summary.total_cash_flow);
    println!(
        "  Lowest Cumulative Cash: {:.2} (period {})",
        summary.min_cumulative_cash, summary.min_cumulative_period
    );
    println!("  Negative Periods: {}", summary.negative_periods);

    if let Some(npv) = outcome.npv {
        println!("  NPV @ {:.2}%: {:.2}", config.discount_rate.unwrap_or(0.0) * 100.0, npv);
    }
    if let Some(rate) = irr(&outcome.projection.cash_flows(), config.granularity.periods_per_year()) {
        println!("  IRR (annualized): {:.4}%", rate * 100.0);
    }
}

fn write_csv(path: &Path, outcome: &ScenarioOutcome) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("unable to create {}", path.display()))?;
    for row in &outcome.projection.rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
