pub mod app;
pub mod chart;
pub mod form;
pub mod logging;
pub mod report;

pub use app::{OutputOptions, load_schedule, present, run_interactive, run_once};
