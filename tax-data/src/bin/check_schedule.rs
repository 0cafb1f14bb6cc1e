use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tax_core::calculations::common::{format_amount, format_rate_percent};
use tax_core::{TaxBreakdownCalculator, parse_salary};
use tax_data::ScheduleLoader;

/// Validate a tax schedule file and print its brackets.
///
/// The file is either a full schedule in TOML, or a CSV with the columns:
/// - upper_bound: top of the bracket (empty for the last, unbounded bracket)
/// - rate: the marginal tax rate as a fraction (e.g. 0.017)
#[derive(Parser, Debug)]
#[command(name = "tax-schedule-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the schedule (.toml or .csv)
    #[arg(short, long)]
    file: PathBuf,

    /// Also compute the total tax for this salary
    #[arg(short, long)]
    salary: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Loading schedule from: {}", args.file.display());

    let schedule = ScheduleLoader::from_path(&args.file)
        .with_context(|| format!("Failed to load schedule: {}", args.file.display()))?;

    println!("{} ({})", schedule.name, schedule.currency);

    let mut lower = "0".to_string();
    for bracket in &schedule.brackets {
        let upper = bracket
            .upper_bound
            .map(|b| b.to_string())
            .unwrap_or_else(|| "and above".to_string());
        println!(
            "  {lower:>12} .. {upper:<12} {:>5}%",
            format_rate_percent(bracket.rate)
        );
        if let Some(bound) = bracket.upper_bound {
            lower = bound.to_string();
        }
    }
    println!(
        "  national insurance {}%, general tax {}%",
        format_rate_percent(schedule.flat_rates.national_insurance()),
        format_rate_percent(schedule.flat_rates.general_tax())
    );

    if let Some(input) = &args.salary {
        let salary = parse_salary(input).context("Invalid salary")?;
        let breakdown = TaxBreakdownCalculator::new(&schedule).compute_breakdown(salary)?;
        println!(
            "Total tax on {} {}: {} {}",
            schedule.currency,
            format_amount(salary),
            schedule.currency,
            format_amount(breakdown.total_tax())
        );
    }

    Ok(())
}
