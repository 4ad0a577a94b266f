//! Plain-text rendering of results.

use crate::{
    compare::IndicatorSeries,
    engine::CustomerRecord,
    indicators::Indicators,
    store::SavedRun,
};

const TABLE_HEADERS: [&str; 8] = [
    "Customer", "Interval", "Duration", "Arrival", "Start", "End", "Wait", "System",
];

/// The customer table, one row per customer, times with two decimals.
pub fn render_table(records: &[CustomerRecord]) -> String {
    let rows: Vec<[String; 8]> = records
        .iter()
        .map(|r| {
            [
                r.customer_id.to_string(),
                format!("{:.2}", r.interval),
                format!("{:.2}", r.duration),
                format!("{:.2}", r.arrival_time),
                format!("{:.2}", r.service_start),
                format!("{:.2}", r.service_end),
                format!("{:.2}", r.wait_time),
                format!("{:.2}", r.system_time),
            ]
        })
        .collect();

    let mut widths = TABLE_HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &TABLE_HEADERS, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

/// The indicator summary, one line per indicator.
pub fn render_indicators(indicators: &Indicators) -> String {
    let entries = indicators.entries();
    let label_width = entries
        .iter()
        .map(|(indicator, _)| indicator.label().chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (indicator, value) in entries {
        let label = indicator.label();
        let pad = label_width - label.chars().count();
        out.push_str(&format!(
            "{label}:{:pad$} {value:.prec$}\n",
            "",
            pad = pad,
            prec = indicator.precision()
        ));
    }
    out
}

/// Indicators side by side: one row per indicator, one column per run.
pub fn render_comparison(runs: &[SavedRun]) -> String {
    let series = IndicatorSeries::from_runs(runs);

    let mut header = vec!["Indicator".to_string()];
    header.extend(series.labels().iter().cloned());

    let rows: Vec<Vec<String>> = series
        .iter()
        .map(|(indicator, values)| {
            let mut row = vec![indicator.label().to_string()];
            row.extend(
                values
                    .iter()
                    .map(|v| format!("{v:.prec$}", prec = indicator.precision())),
            );
            row
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &header, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

/// Saved runs, one per line: id, save time and name.
pub fn render_saved_list(runs: &[SavedRun]) -> String {
    let mut out = String::new();
    for run in runs {
        out.push_str(&format!(
            "{}  {}  {}\n",
            run.id,
            run.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            run.name
        ));
    }
    out
}

/// First column left aligned, the rest right aligned.
fn push_row<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize]) {
    let mut line = String::new();
    for (idx, (cell, width)) in cells.iter().zip(widths).enumerate() {
        let cell = cell.as_ref();
        let pad = width.saturating_sub(cell.chars().count());
        if idx == 0 {
            line.push_str(cell);
            line.push_str(&" ".repeat(pad));
        } else {
            line.push_str("  ");
            line.push_str(&" ".repeat(pad));
            line.push_str(cell);
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
