//! Getting schedules in and breakdown tables out.
//!
//! [`loader`] reads a [`tax_core::TaxSchedule`] from TOML or a bracket-only
//! CSV file; [`export`] serialises a [`tax_core::TaxBreakdown`] as a
//! two-column delimited table.

pub mod export;
pub mod loader;

pub use export::{DEFAULT_FILE_NAME, ExportError, ExportFormat, TableExporter};
pub use loader::{BracketLoader, BracketRecord, ScheduleLoadError, ScheduleLoader};
