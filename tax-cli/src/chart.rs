//! Stacked bar chart of a breakdown: every tax component plus net income,
//! which together add up to the gross salary.
//!
//! Segments are shown largest first. That ordering is for display only; the
//! breakdown itself keeps its canonical order.

use std::fmt::Write;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tax_core::TaxBreakdown;
use tax_core::calculations::common::format_amount;

/// Colours cycle in canonical row order.
pub const PALETTE: [&str; 6] = ["orange", "red", "yellow", "green", "purple", "pink"];

const SVG_WIDTH: usize = 560;
const SVG_HEIGHT: usize = 420;
const SVG_MARGIN: usize = 50;
const COLUMN_WIDTH: usize = 120;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSegment {
    pub label: String,
    pub amount: Decimal,
    /// Fraction of gross salary, in `[0, 1]` for non-negative amounts.
    pub share: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StackedBarChart {
    title: String,
    currency: String,
    segments: Vec<ChartSegment>,
}

impl StackedBarChart {
    pub fn from_breakdown(
        breakdown: &TaxBreakdown,
        title: &str,
        currency: &str,
    ) -> Self {
        let salary = breakdown.salary();

        let mut segments: Vec<ChartSegment> = breakdown
            .table_rows()
            .into_iter()
            .enumerate()
            .map(|(i, row)| ChartSegment {
                share: (row.amount / salary).to_f64().unwrap_or(0.0),
                label: row.label,
                amount: row.amount,
                color: PALETTE[i % PALETTE.len()],
            })
            .collect();

        // Stable: equal amounts keep canonical order.
        segments.sort_by(|a, b| b.amount.cmp(&a.amount));

        Self {
            title: title.to_string(),
            currency: currency.to_string(),
            segments,
        }
    }

    /// Segments in display order (descending amount).
    pub fn segments(&self) -> &[ChartSegment] {
        &self.segments
    }

    /// One horizontal bar per segment, `width` cells for the whole salary.
    pub fn render_text(
        &self,
        width: usize,
    ) -> String {
        let label_width = self
            .segments
            .iter()
            .map(|s| s.label.chars().count())
            .max()
            .unwrap_or(0);
        let amount_width = self
            .segments
            .iter()
            .map(|s| format_amount(s.amount).len())
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        let _ = writeln!(out, "{} ({})", self.title, self.currency);
        for segment in &self.segments {
            let cells = (segment.share * width as f64).round().max(0.0) as usize;
            let _ = writeln!(
                out,
                "{:<label_width$} |{:<width$}| {:>amount_width$} {:>5.1}%",
                segment.label,
                "█".repeat(cells.min(width)),
                format_amount(segment.amount),
                segment.share * 100.0,
            );
        }
        out
    }

    /// A standalone SVG document: one stacked column (largest segment at
    /// the bottom) with a legend to its right.
    pub fn render_svg(&self) -> String {
        let chart_height = (SVG_HEIGHT - 2 * SVG_MARGIN) as f64;
        let column_x = SVG_MARGIN as f64;
        let baseline = (SVG_HEIGHT - SVG_MARGIN) as f64;
        let legend_x = SVG_MARGIN + COLUMN_WIDTH + 40;

        let mut bars = String::new();
        let mut legend = String::new();
        let mut stacked = 0.0;

        for (i, segment) in self.segments.iter().enumerate() {
            let height = segment.share.max(0.0) * chart_height;
            let y = baseline - stacked - height;
            stacked += height;

            let _ = write!(
                bars,
                r##"<rect x="{:.1}" y="{:.1}" width="{}" height="{:.1}" fill="{}" stroke="white" stroke-width="1"><title>{}</title></rect>"##,
                column_x,
                y,
                COLUMN_WIDTH,
                height,
                segment.color,
                escape_xml(&segment.label),
            );

            let legend_y = SVG_MARGIN + i * 24;
            let _ = write!(
                legend,
                r##"<rect x="{}" y="{}" width="14" height="14" fill="{}"/><text x="{}" y="{}" font-size="12" fill="#374151">{}: {} {}</text>"##,
                legend_x,
                legend_y,
                segment.color,
                legend_x + 20,
                legend_y + 12,
                escape_xml(&segment.label),
                escape_xml(&self.currency),
                format_amount(segment.amount),
            );
        }

        format!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" style="background:white">
  <text x="{tx}" y="24" text-anchor="middle" font-size="15" font-weight="600" fill="#374151">{title}</text>
  <text x="15" y="{ay}" text-anchor="middle" font-size="12" fill="#6b7280" transform="rotate(-90, 15, {ay})">Amount ({cur})</text>
  <line x1="{m}" y1="{b}" x2="{x2}" y2="{b}" stroke="#e5e7eb" stroke-width="2"/>
  {bars}
  {legend}
</svg>
"##,
            w = SVG_WIDTH,
            h = SVG_HEIGHT,
            tx = SVG_WIDTH / 2,
            title = escape_xml(&self.title),
            ay = SVG_HEIGHT / 2,
            cur = escape_xml(&self.currency),
            m = SVG_MARGIN,
            b = SVG_HEIGHT - SVG_MARGIN,
            x2 = SVG_MARGIN + COLUMN_WIDTH,
        )
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
