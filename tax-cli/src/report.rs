//! Plain-text rendering of a breakdown.

use std::fmt::Write;

use tax_core::TaxBreakdown;
use tax_core::calculations::common::{format_amount, round_half_up};

/// `Total tax: NOK 158727.60 which is 31.75% of your salary`
pub fn summary_line(
    breakdown: &TaxBreakdown,
    currency: &str,
) -> String {
    format!(
        "Total tax: {currency} {} which is {:.2}% of your salary",
        format_amount(breakdown.total_tax()),
        round_half_up(breakdown.tax_percentage(), 2)
    )
}

/// The full report: every table row, net income and the tax percentage.
pub fn render_report(
    breakdown: &TaxBreakdown,
    title: &str,
    currency: &str,
) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
    let _ = writeln!(out);

    let _ = writeln!(out, "Tax Breakdown");
    for row in breakdown.table_rows() {
        let _ = writeln!(
            out,
            "- {}: {currency} {}",
            row.label,
            format_amount(row.amount)
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Net Income");
    let _ = writeln!(
        out,
        "Net income after tax: {currency} {}",
        format_amount(breakdown.net_income())
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Tax as Percentage of Salary");
    let _ = writeln!(out, "{}", summary_line(breakdown, currency));

    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tax_core::{TaxBreakdownCalculator, TaxSchedule};

    use super::*;

    fn breakdown_500000() -> TaxBreakdown {
        let schedule = TaxSchedule::norway_2024();
        TaxBreakdownCalculator::new(&schedule)
            .compute_breakdown(dec!(500000))
            .unwrap()
    }

    #[test]
    fn summary_line_rounds_percentage() {
        assert_eq!(
            summary_line(&breakdown_500000(), "NOK"),
            "Total tax: NOK 158727.60 which is 31.75% of your salary"
        );
    }

    #[test]
    fn render_report_lists_every_row_in_order() {
        let report = render_report(&breakdown_500000(), "Norwegian Income Tax 2024", "NOK");

        assert_eq!(
            report,
            "\
Norwegian Income Tax 2024
=========================

Tax Breakdown
- Bracket Tax @ 0.0%: NOK 0.00
- Bracket Tax @ 1.7%: NOK 1441.60
- Bracket Tax @ 4.0%: NOK 8286.00
- National Insurance: NOK 39000.00
- General Tax: NOK 110000.00
- Net Income: NOK 341272.40

Net Income
Net income after tax: NOK 341272.40

Tax as Percentage of Salary
Total tax: NOK 158727.60 which is 31.75% of your salary
"
        );
    }
}
