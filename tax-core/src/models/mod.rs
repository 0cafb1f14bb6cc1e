mod bracket_table;
mod flat_rates;
mod schedule_error;
mod tax_bracket;
mod tax_breakdown;
mod tax_schedule;

pub use bracket_table::BracketTable;
pub use flat_rates::FlatRates;
pub use schedule_error::ScheduleError;
pub use tax_bracket::TaxBracket;
pub use tax_breakdown::{
    ComponentKind, GENERAL_TAX_LABEL, NATIONAL_INSURANCE_LABEL, NET_INCOME_LABEL, TableRow,
    TaxBreakdown, TaxComponent,
};
pub use tax_schedule::TaxSchedule;
