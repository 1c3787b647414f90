//! CSV exports of the usage and statistics tables.

use std::fmt::Write as _;
use std::path::Path;

use rxcensus_analysis::statistics::StatisticsTable;
use rxcensus_core::errors::StorageError;
use rxcensus_core::types::UsageTable;

use crate::json::write_text;

const USAGE_HEADER: [&str; 4] = ["distribution", "repository", "operand", "count"];

const STATS_HEADER: [&str; 9] = [
    "distribution",
    "operand",
    "total uses",
    "presence",
    "coverage",
    "median",
    "mode",
    "average_all",
    "average_present",
];

/// Quote a field when it contains a delimiter, quote, newline or `|`.
pub fn quote_field(field: &str) -> String {
    if field.contains([',', '"', '|', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn header(columns: &[&str]) -> String {
    columns
        .iter()
        .map(|c| format!("\"{c}\""))
        .collect::<Vec<_>>()
        .join(",")
}

fn push_row(out: &mut String, fields: &[String]) {
    let row: Vec<String> = fields.iter().map(|f| quote_field(f)).collect();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "{}", row.join(","));
}

/// One row per (dialect, repository, operator, count).
pub fn usage_csv(table: &UsageTable) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", header(&USAGE_HEADER));
    for row in table.rows() {
        push_row(
            &mut out,
            &[
                row.dialect.to_string(),
                row.repository.to_string(),
                row.operator.to_string(),
                row.count.to_string(),
            ],
        );
    }
    out
}

/// One row per (dialect, operator).
pub fn statistics_csv(stats: &StatisticsTable) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", header(&STATS_HEADER));
    for (dialect, operator, r) in stats.iter() {
        push_row(
            &mut out,
            &[
                dialect.to_string(),
                operator.to_string(),
                r.total_uses.to_string(),
                r.repos_present.to_string(),
                r.coverage.to_string(),
                r.median.to_string(),
                r.mode.to_string(),
                r.average_all.to_string(),
                r.average_present.to_string(),
            ],
        );
    }
    out
}

pub fn write_usage_csv(path: &Path, table: &UsageTable) -> Result<(), StorageError> {
    write_text(path, &usage_csv(table))
}

pub fn write_statistics_csv(path: &Path, stats: &StatisticsTable) -> Result<(), StorageError> {
    write_text(path, &statistics_csv(stats))
}
