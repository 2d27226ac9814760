//! Human-readable rendering of forecasts for the CLI.

use colored::Colorize;
use fintrack_config::Config;
use fintrack_core::ForecastSummary;
use fintrack_domain::{DailyForecastRow, ForecastItem};

pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "AUD" => "A$".into(),
        "BRL" => "R$".into(),
        _ => format!("{code} "),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" | "KRW" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

/// Formats monetary amounts for one currency and locale.
#[derive(Debug, Clone, PartialEq)]
pub struct AmountFormatter {
    symbol: String,
    precision: u8,
    decimal_separator: char,
    grouping_separator: char,
}

impl Default for AmountFormatter {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl AmountFormatter {
    pub fn from_config(config: &Config) -> Self {
        let code = config.currency.trim().to_uppercase();
        let (decimal_separator, grouping_separator) = separators_for(&config.locale);
        Self {
            symbol: symbol_for(&code),
            precision: config
                .currency_precision
                .unwrap_or_else(|| minor_units_for(&code)),
            decimal_separator,
            grouping_separator,
        }
    }

    /// `-$1,234.50` style output. Non-finite values render as `n/a`.
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return "n/a".into();
        }
        let body = format_number(
            value.abs(),
            self.precision,
            self.decimal_separator,
            self.grouping_separator,
        );
        // Rounding can turn tiny negatives into zero; keep the sign off those.
        let sign = if value < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
            "-"
        } else {
            ""
        };
        format!("{sign}{}{body}", self.symbol)
    }
}

fn separators_for(locale: &str) -> (char, char) {
    let language = locale
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match language.as_str() {
        "de" | "es" | "it" | "pt" | "nl" | "id" | "tr" => (',', '.'),
        "fr" | "sv" | "nb" | "fi" | "pl" | "cs" => (',', ' '),
        _ => ('.', ','),
    }
}

pub fn format_number(value: f64, precision: u8, decimal: char, grouping: char) -> String {
    let body = format!("{:.*}", precision as usize, value);
    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (body.as_str(), None),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };
    let mut out = format!("{sign}{}", group_digits(digits, grouping));
    if let Some(frac) = frac_part {
        out.push(decimal);
        out.push_str(frac);
    }
    out
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx != 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct TableColumn {
    pub header: String,
    pub width: usize,
    pub align: Align,
}

impl TableColumn {
    pub fn new(header: impl Into<String>, width: usize, align: Align) -> Self {
        Self {
            header: header.into(),
            width,
            align,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TableCell {
    pub text: String,
    /// Highlighted in red when colour output is enabled.
    pub negative: bool,
}

impl TableCell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            negative: false,
        }
    }

    pub fn amount(formatter: &AmountFormatter, value: f64) -> Self {
        Self {
            text: formatter.format(value),
            negative: value < 0.0,
        }
    }
}

/// Simple column model used for read-only overviews.
#[derive(Debug, Clone)]
pub struct Table {
    pub title: Option<String>,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<TableCell>>,
}

impl Table {
    pub fn new(title: Option<&str>, columns: Vec<TableColumn>) -> Self {
        Self {
            title: title.map(str::to_string),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, cells: Vec<TableCell>) {
        self.rows.push(cells);
    }

    /// Renders padded columns. Cells wider than their column are not truncated.
    pub fn render(&self, color: bool) -> String {
        let mut out = String::new();
        if let Some(title) = &self.title {
            let title = if color {
                title.bold().to_string()
            } else {
                title.clone()
            };
            out.push_str(&title);
            out.push('\n');
        }

        let total_width = self
            .columns
            .iter()
            .map(|col| col.width + 1)
            .sum::<usize>()
            .saturating_sub(1)
            .max(1);
        let header = self
            .columns
            .iter()
            .map(|col| pad(&col.header, col.width, col.align))
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(header.trim_end());
        out.push('\n');
        out.push_str(&"-".repeat(total_width));
        out.push('\n');

        for row in &self.rows {
            let line = self
                .columns
                .iter()
                .enumerate()
                .map(|(idx, column)| {
                    let cell = row.get(idx).cloned().unwrap_or_default();
                    let padded = pad(&cell.text, column.width, column.align);
                    if color && cell.negative {
                        padded.red().to_string()
                    } else {
                        padded
                    }
                })
                .collect::<Vec<_>>()
                .join(" ");
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

fn pad(text: &str, width: usize, align: Align) -> String {
    match align {
        Align::Left => format!("{text:<width$}"),
        Align::Right => format!("{text:>width$}"),
    }
}

/// Forecast items as a table of dated events with their running balance.
pub fn forecast_table(items: &[ForecastItem], formatter: &AmountFormatter) -> Table {
    let mut table = Table::new(
        Some("Cash-flow forecast"),
        vec![
            TableColumn::new("Date", 10, Align::Left),
            TableColumn::new("Type", 10, Align::Left),
            TableColumn::new("Name", 24, Align::Left),
            TableColumn::new("Category", 14, Align::Left),
            TableColumn::new("Amount", 14, Align::Right),
            TableColumn::new("Balance", 14, Align::Right),
        ],
    );
    for item in items {
        table.add_row(vec![
            TableCell::plain(item.day().format("%Y-%m-%d").to_string()),
            TableCell::plain(item.kind.to_string()),
            TableCell::plain(item.name.clone()),
            TableCell::plain(item.category.clone()),
            TableCell::amount(formatter, item.amount),
            TableCell::amount(formatter, item.running_balance),
        ]);
    }
    table
}

pub fn rollup_table(rows: &[DailyForecastRow], formatter: &AmountFormatter) -> Table {
    let mut table = Table::new(
        Some("Daily balances"),
        vec![
            TableColumn::new("Date", 10, Align::Left),
            TableColumn::new("Income", 14, Align::Right),
            TableColumn::new("Expenses", 14, Align::Right),
            TableColumn::new("Net", 14, Align::Right),
            TableColumn::new("Balance", 14, Align::Right),
        ],
    );
    for row in rows {
        table.add_row(vec![
            TableCell::plain(row.date.format("%Y-%m-%d").to_string()),
            TableCell::amount(formatter, row.income),
            TableCell::amount(formatter, row.expenses),
            TableCell::amount(formatter, row.net_change),
            TableCell::amount(formatter, row.balance),
        ]);
    }
    table
}

/// Multi-line summary block printed under a forecast.
pub fn summary_lines(summary: &ForecastSummary, formatter: &AmountFormatter) -> Vec<String> {
    let mut lines = vec![
        format!("Starting balance: {}", formatter.format(summary.starting_balance)),
        format!("Ending balance:   {}", formatter.format(summary.ending_balance)),
        format!("Total inflow:     {}", formatter.format(summary.total_inflow)),
        format!("Total outflow:    {}", formatter.format(summary.total_outflow)),
        format!("Net change:       {}", formatter.format(summary.net_change)),
        format!(
            "Events:           {} ({} income, {} bill, {} expense, {} adjustment)",
            summary.event_count(),
            summary.income_events,
            summary.bill_events,
            summary.expense_events,
            summary.adjustment_events
        ),
    ];
    let lowest = match summary.lowest_balance_date {
        Some(date) => format!(
            "Lowest balance:   {} on {}",
            formatter.format(summary.lowest_balance),
            date.format("%Y-%m-%d")
        ),
        None => format!("Lowest balance:   {}", formatter.format(summary.lowest_balance)),
    };
    lines.push(lowest);
    if let Some(date) = summary.first_negative_date {
        lines.push(format!("Goes negative on: {}", date.format("%Y-%m-%d")));
    }
    lines
}
