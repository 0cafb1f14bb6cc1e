use std::io;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::debug;

use tax_cli::{OutputOptions, app, logging};
use tax_data::{DEFAULT_FILE_NAME, ExportFormat};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Norwegian income tax calculator.
///
/// Splits a salary into progressive bracket tax, national insurance and
/// general tax, then prints the breakdown, net income and a chart.
/// Without `--salary` it asks for salaries interactively.
#[derive(Debug, Parser)]
#[command(name = "nok-tax", version, about)]
struct Cli {
    /// Gross yearly salary. Thousands separators are allowed (`500 000`).
    #[arg(short, long, allow_hyphen_values = true)]
    salary: Option<String>,

    /// Schedule file to use instead of the built-in 2024 table (.toml or .csv).
    #[arg(long)]
    schedule: Option<PathBuf>,

    /// Export the breakdown table to this path.
    /// Pass the flag without a value to use `tax_results.csv`.
    #[arg(short, long, num_args = 0..=1, default_missing_value = DEFAULT_FILE_NAME)]
    export: Option<PathBuf>,

    /// Export format. Defaults to the export path's extension, then CSV.
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Also write the chart as an SVG file.
    #[arg(long)]
    chart_svg: Option<PathBuf>,

    /// Do not print the terminal chart.
    #[arg(long, default_value_t = false)]
    no_chart: bool,

    /// Width of the terminal chart in cells.
    #[arg(long, default_value_t = 40)]
    chart_width: usize,

    /// Log filter (`debug`, `tax_core=trace`, ...). Overrides RUST_LOG.
    #[arg(long)]
    log_level: Option<String>,

    /// Append log records to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Tsv,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Tsv => ExportFormat::Tsv,
        }
    }
}

impl Cli {
    fn output_options(&self) -> OutputOptions {
        let export = self.export.as_ref().map(|path| {
            let format = self
                .format
                .map(ExportFormat::from)
                .or_else(|| ExportFormat::from_path(path))
                .unwrap_or_default();
            (path.clone(), format)
        });

        OutputOptions {
            export,
            chart_svg: self.chart_svg.clone(),
            text_chart_width: (!self.no_chart).then_some(self.chart_width),
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref())?;
    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
    }

    let schedule = app::load_schedule(cli.schedule.as_deref())?;
    let options = cli.output_options();
    debug!(schedule = %schedule.name, ?options, "starting");

    let stdout = io::stdout();
    match &cli.salary {
        Some(salary) => {
            if let Err(err) = app::run_once(&schedule, salary, &options, &mut stdout.lock()) {
                if let Some(message) = app::rejected_salary_message(&err) {
                    eprintln!("{message}");
                    std::process::exit(app::INVALID_INPUT_EXIT_CODE);
                }
                return Err(err);
            }
        }
        None => {
            let shown = app::run_interactive(&schedule, &options, io::stdin().lock(), stdout.lock())?;
            debug!(shown, "interactive session ended");
        }
    }

    Ok(())
}
