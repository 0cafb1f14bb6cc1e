use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BracketTable, FlatRates, TaxBracket};

/// Everything the calculator needs to know about one tax regime.
///
/// Swapping the schedule (a new tax year, a different table loaded from
/// disk) never touches the calculation logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSchedule {
    /// Human readable title, e.g. "Norwegian Income Tax 2024".
    pub name: String,

    /// Currency code used when amounts are displayed or exported.
    pub currency: String,

    pub brackets: BracketTable,

    pub flat_rates: FlatRates,
}

impl TaxSchedule {
    /// The 2024 Norwegian step tax (trinnskatt) table with national
    /// insurance at 7.8% and general tax at 22%.
    ///
    /// | Upper bound (NOK) | Rate  |
    /// |-------------------|-------|
    /// | 208 050           | 0.0%  |
    /// | 292 850           | 1.7%  |
    /// | 670 000           | 4.0%  |
    /// | 937 900           | 13.6% |
    /// | 1 350 000         | 16.6% |
    /// | unbounded         | 17.6% |
    pub fn norway_2024() -> Self {
        let brackets = BracketTable::from_trusted(vec![
            TaxBracket::bounded(Decimal::new(208_050, 0), Decimal::new(0, 1)),
            TaxBracket::bounded(Decimal::new(292_850, 0), Decimal::new(17, 3)),
            TaxBracket::bounded(Decimal::new(670_000, 0), Decimal::new(4, 2)),
            TaxBracket::bounded(Decimal::new(937_900, 0), Decimal::new(136, 3)),
            TaxBracket::bounded(Decimal::new(1_350_000, 0), Decimal::new(166, 3)),
            TaxBracket::unbounded(Decimal::new(176, 3)),
        ]);

        Self {
            name: "Norwegian Income Tax 2024".to_string(),
            currency: "NOK".to_string(),
            brackets,
            flat_rates: FlatRates::from_trusted(Decimal::new(78, 3), Decimal::new(22, 2)),
        }
    }

    /// Replaces the brackets while keeping name, currency and flat rates.
    pub fn with_brackets(
        mut self,
        brackets: BracketTable,
    ) -> Self {
        self.brackets = brackets;
        self
    }
}

impl Default for TaxSchedule {
    fn default() -> Self {
        Self::norway_2024()
    }
}
