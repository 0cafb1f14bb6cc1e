//! Two-column table export of a tax breakdown.
//!
//! ## Layout
//!
//! | Column             | Content                                   |
//! |--------------------|-------------------------------------------|
//! | `Tax Components`   | component label, then `Net Income`        |
//! | `Amount (<CUR>)`   | amount rounded half-up to two decimals    |
//!
//! Rows follow the breakdown's canonical order. CSV is comma separated;
//! TSV is tab separated and pastes directly into a spreadsheet.
//!
//! ### Example
//!
//! ```csv
//! Tax Components,Amount (NOK)
//! Bracket Tax @ 0.0%,0.00
//! Bracket Tax @ 1.7%,1441.60
//! Bracket Tax @ 4.0%,8286.00
//! National Insurance,39000.00
//! General Tax,110000.00
//! Net Income,341272.40
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use tax_core::TaxBreakdown;
use tax_core::calculations::common::format_amount;
use thiserror::Error;
use tracing::info;

/// File name offered when the caller does not pick one.
pub const DEFAULT_FILE_NAME: &str = "tax_results.csv";

pub const COMPONENT_HEADER: &str = "Tax Components";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to flush export: {0}")]
    Flush(#[from] std::io::Error),

    #[error("cannot write '{path}': {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Delimited text flavours the exporter can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn delimiter(self) -> u8 {
        match self {
            Self::Csv => b',',
            Self::Tsv => b'\t',
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
        }
    }

    /// Guesses the format from a file extension, if it is a known one.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path
            .extension()?
            .to_str()?
            .to_ascii_lowercase()
            .as_str()
        {
            "csv" => Some(Self::Csv),
            "tsv" | "tab" => Some(Self::Tsv),
            _ => None,
        }
    }
}

/// Writes the `(label, amount)` table of a breakdown.
#[derive(Debug, Clone, Copy)]
pub struct TableExporter<'a> {
    currency: &'a str,
    format: ExportFormat,
}

impl<'a> TableExporter<'a> {
    pub fn new(
        currency: &'a str,
        format: ExportFormat,
    ) -> Self {
        Self { currency, format }
    }

    /// `Amount (NOK)`
    pub fn amount_header(&self) -> String {
        format!("Amount ({})", self.currency)
    }

    /// Write the header and every row to `writer`.
    pub fn write<W: Write>(
        &self,
        breakdown: &TaxBreakdown,
        writer: W,
    ) -> Result<(), ExportError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(self.format.delimiter())
            .from_writer(writer);

        csv_writer.write_record([COMPONENT_HEADER, self.amount_header().as_str()])?;
        for row in breakdown.table_rows() {
            csv_writer.write_record([row.label.as_str(), format_amount(row.amount).as_str()])?;
        }
        csv_writer.flush()?;

        Ok(())
    }

    /// The exported table as bytes, ready to hand to a download or a pipe.
    pub fn to_bytes(
        &self,
        breakdown: &TaxBreakdown,
    ) -> Result<Vec<u8>, ExportError> {
        let mut buffer = Vec::new();
        self.write(breakdown, &mut buffer)?;
        Ok(buffer)
    }

    /// Create (or truncate) `path` and write the table into it.
    pub fn write_to_path(
        &self,
        breakdown: &TaxBreakdown,
        path: &Path,
    ) -> Result<(), ExportError> {
        let file = std::fs::File::create(path).map_err(|source| ExportError::File {
            path: path.to_path_buf(),
            source,
        })?;
        self.write(breakdown, std::io::BufWriter::new(file))?;

        info!(
            path = %path.display(),
            format = self.format.extension(),
            rows = breakdown.components().len() + 1,
            "exported tax breakdown"
        );

        Ok(())
    }
}
