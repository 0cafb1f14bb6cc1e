//! Parsing of user-entered salary text.

use rust_decimal::Decimal;

use super::InvalidInput;

/// Strips surrounding whitespace and thousands separators (`,`, `_`, inner
/// spaces) so `"1 350 000"` and `"1,350,000"` both read as `1350000`.
fn normalize_salary_input(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '_') && !c.is_whitespace())
        .collect()
}

/// Parses a salary typed by the user.
///
/// # Errors
///
/// * [`InvalidInput::NotANumber`] for empty or non-numeric text.
/// * [`InvalidInput::NonPositive`] when the value is zero or negative.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::parse_salary;
///
/// assert_eq!(parse_salary("500 000"), Ok(dec!(500000)));
/// assert!(parse_salary("-100").is_err());
/// ```
pub fn parse_salary(s: &str) -> Result<Decimal, InvalidInput> {
    let normalized = normalize_salary_input(s);
    if normalized.is_empty() {
        return Err(InvalidInput::NotANumber(s.to_string()));
    }

    let salary: Decimal = normalized.parse().map_err(|e| {
        tracing::debug!(input = %s, "salary is not a number: {}", e);
        InvalidInput::NotANumber(s.to_string())
    })?;

    if salary <= Decimal::ZERO {
        tracing::debug!(%salary, "salary is not positive");
        return Err(InvalidInput::NonPositive(salary));
    }

    Ok(salary)
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_salary_accepts_plain_number() {
        assert_eq!(parse_salary("500000"), Ok(dec!(500000)));
    }

    #[test]
    fn parse_salary_accepts_decimals() {
        assert_eq!(parse_salary("612345.50"), Ok(dec!(612345.50)));
    }

    #[test]
    fn parse_salary_strips_thousands_separators() {
        assert_eq!(parse_salary("1,350,000"), Ok(dec!(1350000)));
        assert_eq!(parse_salary("1 350 000"), Ok(dec!(1350000)));
        assert_eq!(parse_salary("1_350_000"), Ok(dec!(1350000)));
    }

    #[test]
    fn parse_salary_trims_whitespace() {
        assert_eq!(parse_salary("  750000\n"), Ok(dec!(750000)));
    }

    #[test]
    fn parse_salary_rejects_zero() {
        assert_eq!(parse_salary("0"), Err(InvalidInput::NonPositive(dec!(0))));
    }

    #[test]
    fn parse_salary_rejects_negative() {
        assert_eq!(
            parse_salary("-100"),
            Err(InvalidInput::NonPositive(dec!(-100)))
        );
    }

    #[test]
    fn parse_salary_rejects_text() {
        assert_eq!(
            parse_salary("lots"),
            Err(InvalidInput::NotANumber("lots".to_string()))
        );
    }

    #[test]
    fn parse_salary_rejects_empty() {
        assert_eq!(
            parse_salary("   "),
            Err(InvalidInput::NotANumber("   ".to_string()))
        );
    }

    // =========================================================================
    // logging
    // =========================================================================

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn rejected_salaries_are_not_logged_as_warnings() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            assert!(parse_salary("lots").is_err());
            assert!(parse_salary("-100").is_err());
            tracing::warn!("end of input");
        });

        let text = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(text.contains("end of input"));
        assert!(!text.contains("salary"), "unexpected warnings: {text}");
    }
}
