// ============================================================
// PIVOT TYPES
// ============================================================
// Row x column aggregation request and result

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// How values are folded into a pivot cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AggregationType {
    /// Add the numeric value of the value field
    Sum,
    /// Add one per row. Any mode other than `sum` aggregates this way.
    #[default]
    Count,
}

impl AggregationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationType::Sum => "sum",
            AggregationType::Count => "count",
        }
    }
}

impl FromStr for AggregationType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "sum" {
            Ok(AggregationType::Sum)
        } else {
            Ok(AggregationType::Count)
        }
    }
}

impl Serialize for AggregationType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AggregationType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or_default())
    }
}

/// Field selection for a pivot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotConfig {
    pub row_field: String,
    pub column_field: String,
    pub value_field: String,
    #[serde(default)]
    pub agg_type: AggregationType,
}

impl PivotConfig {
    /// All three fields must name a column
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("rowField", &self.row_field),
            ("columnField", &self.column_field),
            ("valueField", &self.value_field),
        ] {
            if value.trim().is_empty() {
                return Err(format!("{} must not be empty", name));
            }
        }
        Ok(())
    }
}

/// One output row: its label plus an accumulated number per column key.
///
/// Serializes flat, as `{"row": label, "<column>": number, ...}`.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotRow {
    pub label: String,
    pub values: Vec<(String, f64)>,
}

impl PivotRow {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            values: Vec::new(),
        }
    }

    /// Add `amount` to the cell under `column`
    pub fn add(&mut self, column: &str, amount: f64) {
        match self.values.iter_mut().find(|(c, _)| c == column) {
            Some((_, total)) => *total += amount,
            None => self.values.push((column.to_string(), amount)),
        }
    }

    pub fn get(&self, column: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| *v)
    }
}

impl Serialize for PivotRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 1))?;
        map.serialize_entry("row", &self.label)?;
        for (column, value) in &self.values {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PivotResult {
    /// One entry per distinct row key, in encounter order
    pub rows: Vec<PivotRow>,
    /// Distinct column keys, sorted
    pub columns: Vec<String>,
}

impl PivotResult {
    pub fn row(&self, label: &str) -> Option<&PivotRow> {
        self.rows.iter().find(|r| r.label == label)
    }
}
