use serde::Serialize;
use std::collections::BTreeMap;

use super::harmonized::Row;

/// Count buckets keyed by category label
pub type CountMap = BTreeMap<String, usize>;

/// Dashboard-ready aggregates over a set of harmonized rows.
///
/// Drill-down lists borrow the rows they were computed from.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics<'a> {
    pub total: usize,
    pub escape_count: usize,
    pub expired_card_count: usize,
    pub active_count: usize,
    pub upcoming_renewals: usize,

    pub nationality_data: CountMap,
    pub nationality_escape_data: CountMap,
    pub nationality_expired_data: CountMap,
    pub status_data: CountMap,

    /// Expiry cohorts keyed by `YYYY-MM`
    pub monthly_renewals: CountMap,
    /// Escape records bucketed by their expiry month
    pub monthly_escapes: CountMap,

    pub escape_records: Vec<&'a Row>,
    pub expired_records: Vec<&'a Row>,
    pub upcoming_records: Vec<&'a Row>,
}

/// Increment the bucket for `key`
pub fn bump(map: &mut CountMap, key: &str) {
    *map.entry(key.to_string()).or_insert(0) += 1;
}
