// ============================================================
// RECORD MERGER
// ============================================================
// Collapse continuation rows (blank first column) into the record
// they belong to

use tracing::warn;

use crate::domain::harmonized::{CellValue, Row};

/// Merge multi-row records. The first raw row's keys are the canonical
/// column list and its first key is the record identifier.
///
/// A row with a non-blank identifier starts a new record; a row with a
/// blank identifier appends its non-blank cells to the current record,
/// newline-separated.
pub fn merge_records(raw_rows: &[Row]) -> Vec<Row> {
    let Some(first) = raw_rows.first() else {
        return Vec::new();
    };

    let headers: Vec<String> = first.keys().map(str::to_string).collect();
    let id_header = headers.first();

    let mut merged: Vec<Row> = Vec::with_capacity(raw_rows.len());

    for (index, row) in raw_rows.iter().enumerate() {
        let has_identifier = id_header.map_or(false, |h| !row.value(h).is_blank());

        if has_identifier {
            merged.push(row.clone());
            continue;
        }

        match merged.last_mut() {
            Some(current) => absorb_fragment(current, row, &headers),
            None => {
                warn!(
                    row_index = index,
                    "Leading row has no record identifier; keeping it as a standalone record"
                );
                merged.push(row.clone());
            }
        }
    }

    merged
}

fn absorb_fragment(current: &mut Row, fragment: &Row, headers: &[String]) {
    for header in headers {
        let value = fragment.value(header).trimmed();
        if value.is_empty() {
            continue;
        }

        let existing = current.value(header).trimmed();
        let combined = if existing.is_empty() {
            value
        } else {
            format!("{}\n{}", existing, value)
        };
        current.insert(header.as_str(), CellValue::Text(combined));
    }
}
