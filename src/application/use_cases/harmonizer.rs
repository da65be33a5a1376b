// ============================================================
// HARMONIZER USE CASE
// ============================================================
// Raw sheet rows -> merged records -> profiled schema -> typed rows

use std::time::Instant;

use tracing::debug;

use super::column_profiler::profile_columns;
use super::record_merger::merge_records;
use super::row_reassembler::reassemble_row;
use crate::domain::harmonized::{HarmonizedData, Row};

/// Harmonize an already-parsed sheet.
///
/// Profiling sees every merged record before any row is re-assembled, so the
/// two passes stay separate and communicate only through the expansion map.
pub fn harmonize_rows(raw_rows: &[Row]) -> HarmonizedData {
    if raw_rows.is_empty() {
        return HarmonizedData::default();
    }

    let start = Instant::now();

    let merged = merge_records(raw_rows);
    let original_headers: Vec<String> = merged
        .first()
        .map(|row| row.keys().map(str::to_string).collect())
        .unwrap_or_default();

    let expansion = profile_columns(&merged, &original_headers);
    let headers = expansion.headers();

    let rows: Vec<Row> = merged
        .iter()
        .map(|row| reassemble_row(row, &original_headers, &expansion))
        .collect();

    debug!(
        raw_rows = raw_rows.len(),
        records = rows.len(),
        original_columns = original_headers.len(),
        columns = headers.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Harmonized sheet"
    );

    HarmonizedData {
        headers,
        rows,
        original_headers,
    }
}
