// ============================================================
// SCHEMA EXPANSION TYPES
// ============================================================
// Output of the column profiling pass, consumed by row re-assembly

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Row, TokenType};

/// Every token type observed in one original column
pub type ColumnTypeSet = BTreeSet<TokenType>;

/// Original column name -> ordered list of 1..=3 target column names.
/// Entries keep the original column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpansionMap {
    entries: Vec<(String, Vec<String>)>,
}

impl ExpansionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, original: impl Into<String>, targets: Vec<String>) {
        self.entries.push((original.into(), targets));
    }

    /// Target columns of `original`, if the column was profiled
    pub fn targets(&self, original: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(name, _)| name == original)
            .map(|(_, targets)| targets.as_slice())
    }

    pub fn is_split(&self, original: &str) -> bool {
        self.targets(original).map_or(false, |t| t.len() > 1)
    }

    /// Final header sequence: every column's targets, in original column order
    pub fn headers(&self) -> Vec<String> {
        self.entries
            .iter()
            .flat_map(|(_, targets)| targets.iter().cloned())
            .collect()
    }
}

/// Result of harmonizing a sheet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarmonizedData {
    /// Final column names, in output order
    pub headers: Vec<String>,

    /// One row per logical record, keyed by `headers`
    pub rows: Vec<Row>,

    /// Column names before expansion
    pub original_headers: Vec<String>,
}

impl HarmonizedData {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
