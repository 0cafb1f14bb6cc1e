use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ScheduleError;

/// The two levies charged on gross salary, independent of the brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFlatRates", into = "RawFlatRates")]
pub struct FlatRates {
    national_insurance: Decimal,
    general_tax: Decimal,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFlatRates {
    national_insurance: Decimal,
    general_tax: Decimal,
}

impl FlatRates {
    /// # Errors
    ///
    /// [`ScheduleError::FlatRateOutOfRange`] if either rate is outside `[0, 1]`.
    pub fn new(
        national_insurance: Decimal,
        general_tax: Decimal,
    ) -> Result<Self, ScheduleError> {
        check_rate("national insurance", national_insurance)?;
        check_rate("general tax", general_tax)?;

        Ok(Self {
            national_insurance,
            general_tax,
        })
    }

    pub(crate) fn from_trusted(
        national_insurance: Decimal,
        general_tax: Decimal,
    ) -> Self {
        debug_assert!(Self::new(national_insurance, general_tax).is_ok());
        Self {
            national_insurance,
            general_tax,
        }
    }

    pub fn national_insurance(&self) -> Decimal {
        self.national_insurance
    }

    pub fn general_tax(&self) -> Decimal {
        self.general_tax
    }
}

fn check_rate(
    name: &'static str,
    rate: Decimal,
) -> Result<(), ScheduleError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(ScheduleError::FlatRateOutOfRange { name, rate });
    }
    Ok(())
}

impl TryFrom<RawFlatRates> for FlatRates {
    type Error = ScheduleError;

    fn try_from(raw: RawFlatRates) -> Result<Self, Self::Error> {
        Self::new(raw.national_insurance, raw.general_tax)
    }
}

impl From<FlatRates> for RawFlatRates {
    fn from(rates: FlatRates) -> Self {
        Self {
            national_insurance: rates.national_insurance,
            general_tax: rates.general_tax,
        }
    }
}
