//! Progressive bracket tax plus flat levies.
//!
//! # Algorithm
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Reject a salary that is zero or negative |
//! | 2    | Walk the brackets in order while `salary > last_boundary` |
//! | 3    | Tax `min(salary, upper_bound) - last_boundary` at the bracket rate |
//! | 4    | National insurance: `salary × national_insurance` |
//! | 5    | General tax: `salary × general_tax` |
//! | 6    | Total tax, net income and tax percentage from the components |
//!
//! Every product and sum is checked. A salary whose tax does not fit in a
//! `Decimal` is rejected with [`InvalidInput::TooLarge`].
//!
//! The flat levies are charged on gross salary and stack on top of the
//! bracket tax. Brackets above the salary produce no component; a 0% bracket
//! below it still does, with amount zero.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::{TaxBreakdownCalculator, TaxSchedule};
//!
//! let schedule = TaxSchedule::norway_2024();
//! let calculator = TaxBreakdownCalculator::new(&schedule);
//! let breakdown = calculator.compute_breakdown(dec!(500000)).unwrap();
//!
//! assert_eq!(breakdown.bracket_tax(), dec!(9727.60));
//! assert_eq!(breakdown.total_tax(), dec!(158727.60));
//! assert_eq!(breakdown.net_income(), dec!(341272.40));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::{format_rate_percent, min};
use crate::{
    ComponentKind, GENERAL_TAX_LABEL, NATIONAL_INSURANCE_LABEL, TaxBreakdown, TaxComponent,
    TaxSchedule,
};

/// The salary cannot be used for a calculation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("salary must be positive, got {0}")]
    NonPositive(Decimal),

    #[error("salary '{0}' is not a valid number")]
    NotANumber(String),

    #[error("salary {0} is too large to calculate")]
    TooLarge(Decimal),
}

/// Computes a [`TaxBreakdown`] for a salary under a borrowed [`TaxSchedule`].
///
/// The calculator holds no mutable state, so one instance can serve any
/// number of calls, from any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct TaxBreakdownCalculator<'a> {
    schedule: &'a TaxSchedule,
}

impl<'a> TaxBreakdownCalculator<'a> {
    pub fn new(schedule: &'a TaxSchedule) -> Self {
        Self { schedule }
    }

    /// Computes the full breakdown for `salary`.
    ///
    /// # Errors
    ///
    /// [`InvalidInput::NonPositive`] when `salary <= 0` and
    /// [`InvalidInput::TooLarge`] when an amount overflows. No breakdown is
    /// produced in either case.
    pub fn compute_breakdown(
        &self,
        salary: Decimal,
    ) -> Result<TaxBreakdown, InvalidInput> {
        if salary <= Decimal::ZERO {
            return Err(InvalidInput::NonPositive(salary));
        }

        let too_large = || InvalidInput::TooLarge(salary);

        let mut components = self.bracket_components(salary).ok_or_else(too_large)?;
        components.push(self.national_insurance(salary).ok_or_else(too_large)?);
        components.push(self.general_tax(salary).ok_or_else(too_large)?);

        let breakdown =
            TaxBreakdown::from_components(salary, components).ok_or_else(too_large)?;

        debug!(
            %salary,
            total_tax = %breakdown.total_tax(),
            net_income = %breakdown.net_income(),
            components = breakdown.components().len(),
            "computed tax breakdown"
        );

        Ok(breakdown)
    }

    /// One component per bracket whose lower boundary lies below `salary`.
    ///
    /// `None` if a bracket amount overflows.
    pub fn bracket_components(
        &self,
        salary: Decimal,
    ) -> Option<Vec<TaxComponent>> {
        let mut components = Vec::new();
        let mut last_boundary = Decimal::ZERO;

        for bracket in &self.schedule.brackets {
            if salary <= last_boundary {
                break;
            }

            let upper = bracket
                .upper_bound
                .map_or(salary, |bound| min(salary, bound));
            let taxable_slice = upper - last_boundary;

            components.push(TaxComponent {
                label: bracket_label(bracket.rate),
                amount: taxable_slice.checked_mul(bracket.rate)?,
                kind: ComponentKind::Bracket { rate: bracket.rate },
            });

            match bracket.upper_bound {
                Some(bound) => last_boundary = bound,
                None => break,
            }
        }

        Some(components)
    }

    fn national_insurance(
        &self,
        salary: Decimal,
    ) -> Option<TaxComponent> {
        Some(TaxComponent {
            label: NATIONAL_INSURANCE_LABEL.to_string(),
            amount: salary.checked_mul(self.schedule.flat_rates.national_insurance())?,
            kind: ComponentKind::NationalInsurance,
        })
    }

    fn general_tax(
        &self,
        salary: Decimal,
    ) -> Option<TaxComponent> {
        Some(TaxComponent {
            label: GENERAL_TAX_LABEL.to_string(),
            amount: salary.checked_mul(self.schedule.flat_rates.general_tax())?,
            kind: ComponentKind::GeneralTax,
        })
    }
}

/// `Bracket Tax @ 1.7%`
pub fn bracket_label(rate: Decimal) -> String {
    format!("Bracket Tax @ {}%", format_rate_percent(rate))
}
