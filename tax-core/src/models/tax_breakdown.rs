use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Label of the synthetic row appended after the tax components.
pub const NET_INCOME_LABEL: &str = "Net Income";

pub const NATIONAL_INSURANCE_LABEL: &str = "National Insurance";

pub const GENERAL_TAX_LABEL: &str = "General Tax";

/// What produced a [`TaxComponent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComponentKind {
    /// A progressive bracket, carrying its marginal rate.
    Bracket { rate: Decimal },
    NationalInsurance,
    GeneralTax,
}

/// One labelled line of a breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxComponent {
    pub label: String,
    pub amount: Decimal,
    pub kind: ComponentKind,
}

impl TaxComponent {
    pub fn is_bracket(&self) -> bool {
        matches!(self.kind, ComponentKind::Bracket { .. })
    }
}

/// A `(label, amount)` pair as handed to charts and exporters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub label: String,
    pub amount: Decimal,
}

/// Result of one calculation.
///
/// Components keep their canonical order: brackets ascending, then national
/// insurance, then general tax. Totals are derived once at construction and
/// are never rounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    salary: Decimal,
    components: Vec<TaxComponent>,
    total_tax: Decimal,
    net_income: Decimal,
    tax_percentage: Decimal,
}

impl TaxBreakdown {
    /// Derives the totals from the components. `salary` must be positive.
    ///
    /// Returns `None` if a total does not fit in a `Decimal`.
    pub(crate) fn from_components(
        salary: Decimal,
        components: Vec<TaxComponent>,
    ) -> Option<Self> {
        let total_tax = components
            .iter()
            .try_fold(Decimal::ZERO, |sum, c| sum.checked_add(c.amount))?;
        let net_income = salary.checked_sub(total_tax)?;
        // Divide first: the quotient stays small, so the scaling cannot overflow.
        let tax_percentage = total_tax
            .checked_div(salary)?
            .checked_mul(Decimal::ONE_HUNDRED)?;

        Some(Self {
            salary,
            components,
            total_tax,
            net_income,
            tax_percentage,
        })
    }

    pub fn salary(&self) -> Decimal {
        self.salary
    }

    pub fn components(&self) -> &[TaxComponent] {
        &self.components
    }

    pub fn total_tax(&self) -> Decimal {
        self.total_tax
    }

    pub fn net_income(&self) -> Decimal {
        self.net_income
    }

    /// Total tax as a percentage of gross salary. Not clamped.
    pub fn tax_percentage(&self) -> Decimal {
        self.tax_percentage
    }

    /// Sum of the progressive bracket components only.
    pub fn bracket_tax(&self) -> Decimal {
        self.components
            .iter()
            .filter(|c| c.is_bracket())
            .map(|c| c.amount)
            .sum()
    }

    /// Components in canonical order followed by a `Net Income` row.
    pub fn table_rows(&self) -> Vec<TableRow> {
        self.components
            .iter()
            .map(|c| TableRow {
                label: c.label.clone(),
                amount: c.amount,
            })
            .chain(std::iter::once(TableRow {
                label: NET_INCOME_LABEL.to_string(),
                amount: self.net_income,
            }))
            .collect()
    }
}
