// ============================================================
// ROW FILTERS
// ============================================================
// Free-text search and expiry date drill-down over harmonized rows

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::metrics_extractor::expiry_date;
use crate::domain::harmonized::Row;

/// Rows where any cell contains `term`, ignoring case. A blank term
/// matches everything.
pub fn search_rows<'a>(rows: &'a [Row], term: &str) -> Vec<&'a Row> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return rows.iter().collect();
    }

    rows.iter()
        .filter(|row| {
            row.values()
                .any(|value| value.to_text().to_lowercase().contains(&needle))
        })
        .collect()
}

/// Inclusive date bounds; a missing bound is open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn is_open(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}

/// Keep rows whose expiry date falls inside `range`. Rows without a
/// readable expiry date are kept.
pub fn filter_by_date_range<'a>(rows: &'a [Row], range: &DateRange) -> Vec<&'a Row> {
    if range.is_open() {
        return rows.iter().collect();
    }

    rows.iter()
        .filter(|row| expiry_date(row).map_or(true, |date| range.contains(date)))
        .collect()
}
