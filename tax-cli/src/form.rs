//! Interactive salary entry.
//!
//! The form keeps asking until it gets a usable salary. Bad input is
//! reported and never ends the session; end of input or `q` does.

use std::io::{self, BufRead, Write};

use rust_decimal::Decimal;
use tax_core::{InvalidInput, parse_salary};
use tracing::warn;

/// Shown for zero or negative salaries.
pub const NOT_POSITIVE_MESSAGE: &str = "Invalid input. Please enter a positive value for salary.";

/// Shown when the text is not a number at all.
pub const NOT_A_NUMBER_MESSAGE: &str = "Invalid input. Please enter a numeric value for salary.";

/// Shown when the tax on a salary cannot be represented.
pub const TOO_LARGE_MESSAGE: &str = "Invalid input. Please enter a smaller value for salary.";

pub fn invalid_input_message(err: &InvalidInput) -> &'static str {
    match err {
        InvalidInput::NonPositive(_) => NOT_POSITIVE_MESSAGE,
        InvalidInput::NotANumber(_) => NOT_A_NUMBER_MESSAGE,
        InvalidInput::TooLarge(_) => TOO_LARGE_MESSAGE,
    }
}

/// Prompts on `output` and reads answers line by line from `input`.
pub struct SalaryForm<R, W> {
    input: R,
    output: W,
    currency: String,
}

impl<R: BufRead, W: Write> SalaryForm<R, W> {
    pub fn new(
        input: R,
        output: W,
        currency: &str,
    ) -> Self {
        Self {
            input,
            output,
            currency: currency.to_string(),
        }
    }

    /// `Enter your salary (NOK): `
    pub fn prompt(&self) -> String {
        format!("Enter your salary ({}): ", self.currency)
    }

    /// Asks until a valid salary is entered.
    ///
    /// Returns `Ok(None)` when input ends or the user types `q`/`quit`.
    pub fn ask_salary(&mut self) -> io::Result<Option<Decimal>> {
        loop {
            let prompt = self.prompt();
            write!(self.output, "{prompt}")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(None);
            }

            let answer = line.trim();
            if answer.eq_ignore_ascii_case("q") || answer.eq_ignore_ascii_case("quit") {
                return Ok(None);
            }

            match parse_salary(answer) {
                Ok(salary) => return Ok(Some(salary)),
                Err(err) => {
                    warn!(%err, "rejected salary input");
                    writeln!(self.output, "{}", invalid_input_message(&err))?;
                }
            }
        }
    }

    /// Gives access to the output so callers can render results between
    /// prompts.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn form(input: &str) -> SalaryForm<Cursor<Vec<u8>>, Vec<u8>> {
        SalaryForm::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), "NOK")
    }

    fn written(form: SalaryForm<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(form.into_output()).unwrap()
    }

    #[test]
    fn ask_salary_accepts_first_valid_answer() {
        let mut form = form("500000\n");

        assert_eq!(form.ask_salary().unwrap(), Some(dec!(500000)));
        assert_eq!(written(form), "Enter your salary (NOK): ");
    }

    #[test]
    fn ask_salary_retries_after_invalid_answers() {
        let mut form = form("abc\n0\n-100\n612 000\n");

        assert_eq!(form.ask_salary().unwrap(), Some(dec!(612000)));
        assert_eq!(
            written(form),
            format!(
                "Enter your salary (NOK): {NOT_A_NUMBER_MESSAGE}\n\
                 Enter your salary (NOK): {NOT_POSITIVE_MESSAGE}\n\
                 Enter your salary (NOK): {NOT_POSITIVE_MESSAGE}\n\
                 Enter your salary (NOK): "
            )
        );
    }

    #[test]
    fn ask_salary_returns_none_at_end_of_input() {
        let mut form = form("");

        assert_eq!(form.ask_salary().unwrap(), None);
        assert_eq!(written(form), "Enter your salary (NOK): \n");
    }

    #[test]
    fn ask_salary_returns_none_on_quit() {
        let mut form = form("Q\n");

        assert_eq!(form.ask_salary().unwrap(), None);
    }

    #[test]
    fn every_invalid_input_has_a_message() {
        assert_eq!(
            invalid_input_message(&InvalidInput::NonPositive(dec!(0))),
            NOT_POSITIVE_MESSAGE
        );
        assert_eq!(
            invalid_input_message(&InvalidInput::NotANumber("x".to_string())),
            NOT_A_NUMBER_MESSAGE
        );
        assert_eq!(
            invalid_input_message(&InvalidInput::TooLarge(Decimal::MAX)),
            TOO_LARGE_MESSAGE
        );
    }

    #[test]
    fn prompt_uses_schedule_currency() {
        let form = SalaryForm::new(Cursor::new(Vec::new()), Vec::new(), "SEK");

        assert_eq!(form.prompt(), "Enter your salary (SEK): ");
    }
}
