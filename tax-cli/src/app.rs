//! Wiring between the calculator and its presenters.
//!
//! Each presenter (text report, chart, table export) receives the same
//! [`TaxBreakdown`] value; none of them call back into the calculator.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tax_core::{InvalidInput, TaxBreakdown, TaxBreakdownCalculator, TaxSchedule, parse_salary};
use tax_data::{ExportFormat, ScheduleLoader, TableExporter};
use tracing::{debug, info, warn};

use crate::chart::StackedBarChart;
use crate::form::{SalaryForm, invalid_input_message};
use crate::report::render_report;

pub const CHART_TITLE: &str = "Tax Breakdown and Net Income";

/// Process exit status when the one-shot salary is rejected.
pub const INVALID_INPUT_EXIT_CODE: i32 = 2;

/// Where and how results are written besides the text report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputOptions {
    pub export: Option<(PathBuf, ExportFormat)>,
    pub chart_svg: Option<PathBuf>,
    /// Width in cells of the terminal chart; `None` disables it.
    pub text_chart_width: Option<usize>,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            export: None,
            chart_svg: None,
            text_chart_width: Some(40),
        }
    }
}

/// Loads the schedule at `path`, or the built-in Norwegian 2024 schedule.
pub fn load_schedule(path: Option<&Path>) -> Result<TaxSchedule> {
    match path {
        Some(path) => ScheduleLoader::from_path(path)
            .with_context(|| format!("Failed to load schedule: {}", path.display())),
        None => {
            debug!("using built-in schedule");
            Ok(TaxSchedule::norway_2024())
        }
    }
}

/// Renders `breakdown` to `out` and writes any requested files.
pub fn present<W: Write>(
    schedule: &TaxSchedule,
    breakdown: &TaxBreakdown,
    options: &OutputOptions,
    out: &mut W,
) -> Result<()> {
    write!(
        out,
        "{}",
        render_report(breakdown, &schedule.name, &schedule.currency)
    )?;

    let chart = StackedBarChart::from_breakdown(breakdown, CHART_TITLE, &schedule.currency);
    if let Some(width) = options.text_chart_width {
        writeln!(out)?;
        write!(out, "{}", chart.render_text(width))?;
    }

    if let Some(path) = &options.chart_svg {
        std::fs::write(path, chart.render_svg())
            .with_context(|| format!("Failed to write chart: {}", path.display()))?;
        info!(path = %path.display(), "wrote chart");
        writeln!(out, "Chart written to {}", path.display())?;
    }

    if let Some((path, format)) = &options.export {
        TableExporter::new(&schedule.currency, *format)
            .write_to_path(breakdown, path)
            .with_context(|| format!("Failed to export results: {}", path.display()))?;
        writeln!(out, "Results exported to {}", path.display())?;
    }

    Ok(())
}

/// One-shot mode: an invalid salary is an error for the caller to report.
pub fn run_once<W: Write>(
    schedule: &TaxSchedule,
    salary: &str,
    options: &OutputOptions,
    out: &mut W,
) -> Result<TaxBreakdown> {
    let salary = parse_salary(salary)?;
    let breakdown = TaxBreakdownCalculator::new(schedule).compute_breakdown(salary)?;
    present(schedule, &breakdown, options, out)?;
    Ok(breakdown)
}

/// The user-facing message for an error from [`run_once`], if the error is a
/// rejected salary rather than an I/O or schedule failure.
pub fn rejected_salary_message(err: &anyhow::Error) -> Option<&'static str> {
    err.downcast_ref::<InvalidInput>().map(invalid_input_message)
}

/// Interactive mode: keep asking for salaries until input ends.
///
/// Returns how many breakdowns were shown.
pub fn run_interactive<R: BufRead, W: Write>(
    schedule: &TaxSchedule,
    options: &OutputOptions,
    input: R,
    output: W,
) -> Result<usize> {
    let calculator = TaxBreakdownCalculator::new(schedule);
    let mut form = SalaryForm::new(input, output, &schedule.currency);
    let mut shown = 0;

    while let Some(salary) = form.ask_salary()? {
        let breakdown = match calculator.compute_breakdown(salary) {
            Ok(breakdown) => breakdown,
            Err(err) => {
                warn!(%err, "rejected salary input");
                writeln!(form.output(), "{}", invalid_input_message(&err))?;
                continue;
            }
        };
        let out = form.output();
        writeln!(out)?;
        present(schedule, &breakdown, options, out)?;
        writeln!(out)?;
        shown += 1;
    }

    Ok(shown)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;

    fn quiet() -> OutputOptions {
        OutputOptions {
            text_chart_width: None,
            ..OutputOptions::default()
        }
    }

    #[test]
    fn load_schedule_defaults_to_norway() {
        let schedule = load_schedule(None).unwrap();

        assert_eq!(schedule, TaxSchedule::norway_2024());
    }

    #[test]
    fn run_once_returns_breakdown_and_prints_report() {
        let schedule = TaxSchedule::norway_2024();
        let mut out = Vec::new();

        let breakdown = run_once(&schedule, "500000", &quiet(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(breakdown.total_tax(), dec!(158727.60));
        assert!(text.contains("Net income after tax: NOK 341272.40"));
        assert!(!text.contains("Tax Breakdown and Net Income"));
    }

    #[test]
    fn run_once_rejects_non_positive_salary() {
        let schedule = TaxSchedule::norway_2024();
        let mut out = Vec::new();

        let err = run_once(&schedule, "-100", &quiet(), &mut out).unwrap_err();

        assert_eq!(err.to_string(), "salary must be positive, got -100");
        assert!(out.is_empty());
    }

    #[test]
    fn rejected_salary_message_maps_invalid_input() {
        let schedule = TaxSchedule::norway_2024();

        let mut out = Vec::new();

        let not_positive = run_once(&schedule, "-100", &quiet(), &mut out).unwrap_err();
        let not_a_number = run_once(&schedule, "abc", &quiet(), &mut out).unwrap_err();

        assert_eq!(
            rejected_salary_message(&not_positive),
            Some(crate::form::NOT_POSITIVE_MESSAGE)
        );
        assert_eq!(
            rejected_salary_message(&not_a_number),
            Some(crate::form::NOT_A_NUMBER_MESSAGE)
        );
    }

    #[test]
    fn rejected_salary_message_ignores_other_errors() {
        let err = load_schedule(Some(Path::new("missing-schedule.toml"))).unwrap_err();

        assert_eq!(rejected_salary_message(&err), None);
    }

    #[test]
    fn present_includes_text_chart_by_default() {
        let schedule = TaxSchedule::norway_2024();
        let breakdown = TaxBreakdownCalculator::new(&schedule)
            .compute_breakdown(dec!(300000))
            .unwrap();
        let mut out = Vec::new();

        present(&schedule, &breakdown, &OutputOptions::default(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Tax Breakdown and Net Income (NOK)"));
    }

    #[test]
    fn run_interactive_counts_each_breakdown() {
        let schedule = TaxSchedule::norway_2024();
        let input = Cursor::new("nope\n500000\n2000000\n");
        let mut output = Vec::new();

        let shown = run_interactive(&schedule, &quiet(), input, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(shown, 2);
        assert!(text.contains(crate::form::NOT_A_NUMBER_MESSAGE));
        assert!(text.contains("- Bracket Tax @ 17.6%: NOK 114400.00"));
    }

    #[test]
    fn run_interactive_reports_overflowing_salary_and_continues() {
        let schedule = TaxSchedule {
            flat_rates: tax_core::FlatRates::new(dec!(1), dec!(1)).unwrap(),
            ..TaxSchedule::norway_2024()
        };
        let input = Cursor::new(format!("{}\n100\n", Decimal::MAX));
        let mut output = Vec::new();

        let shown = run_interactive(&schedule, &quiet(), input, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(shown, 1);
        assert!(text.contains(crate::form::TOO_LARGE_MESSAGE));
    }
}
