// ============================================================
// PIVOT GENERATOR
// ============================================================
// Row x column aggregation over harmonized rows

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeSet, HashMap};

use crate::domain::harmonized::Row;
use crate::domain::pivot::{AggregationType, PivotConfig, PivotResult, PivotRow};

const BLANK_KEY: &str = "(Blank)";

static NON_NUMERIC_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9.\-]+").unwrap());

static LEADING_NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?(?:[0-9]+\.?[0-9]*|\.[0-9]+)").unwrap());

/// Aggregate `rows` into a pivot table.
///
/// Rows come out in the order their key is first seen, columns sorted.
pub fn generate_pivot(rows: &[Row], config: &PivotConfig) -> PivotResult {
    let mut pivot_rows: Vec<PivotRow> = Vec::new();
    let mut row_index: HashMap<String, usize> = HashMap::new();
    let mut columns: BTreeSet<String> = BTreeSet::new();

    for row in rows {
        let row_key = pivot_key(row, &config.row_field);
        let column_key = pivot_key(row, &config.column_field);

        let amount = match config.agg_type {
            AggregationType::Sum => numeric_value(&row.value(&config.value_field).to_text()),
            AggregationType::Count => 1.0,
        };

        let slot = *row_index.entry(row_key.clone()).or_insert_with(|| {
            pivot_rows.push(PivotRow::new(row_key));
            pivot_rows.len() - 1
        });
        pivot_rows[slot].add(&column_key, amount);
        columns.insert(column_key);
    }

    PivotResult {
        rows: pivot_rows,
        columns: columns.into_iter().collect(),
    }
}

fn pivot_key(row: &Row, field: &str) -> String {
    let key = row.value(field).to_text();
    if key.is_empty() {
        BLANK_KEY.to_string()
    } else {
        key
    }
}

/// Lenient number read: drop everything except digits, `.` and `-`, then
/// take the longest leading decimal. Anything unreadable is 0.
pub fn numeric_value(raw: &str) -> f64 {
    let cleaned = NON_NUMERIC_PATTERN.replace_all(raw, "");
    LEADING_NUMBER_PATTERN
        .find(&cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}
