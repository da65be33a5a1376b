// ============================================================
// ROW
// ============================================================
// Ordered column-name -> cell mapping. Key order is the column order,
// so it survives JSON round trips untouched.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::CellValue;

static EMPTY_CELL: CellValue = CellValue::Empty;

/// A spreadsheet row keyed by column name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: Vec<(String, CellValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
        }
    }

    /// Get the cell stored under `key`, if the column is present
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Get the cell under `key`; a missing column reads as an empty cell
    pub fn value(&self, key: &str) -> &CellValue {
        self.get(key).unwrap_or(&EMPTY_CELL)
    }

    /// Insert or replace a cell. Replacing keeps the column's position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        let key = key.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.cells.push((key, value)),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.cells.iter().any(|(k, _)| k == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &CellValue> {
        self.cells.iter().map(|(_, v)| v)
    }

    /// First column name matching `predicate`, in column order
    pub fn find_key(&self, mut predicate: impl FnMut(&str) -> bool) -> Option<&str> {
        self.keys().find(|k| predicate(k))
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<CellValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (key, value) in iter {
            row.insert(key, value);
        }
        row
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (key, value) in &self.cells {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct RowVisitor;

impl<'de> Visitor<'de> for RowVisitor {
    type Value = Row;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object mapping column names to scalar cells")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Row, A::Error> {
        let mut row = Row::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, CellValue>()? {
            row.insert(key, value);
        }
        Ok(row)
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RowVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_column_position() {
        let mut row: Row = [("Name", "Bob"), ("Note", "first")].into_iter().collect();
        row.insert("Name", "Alice");
        row.insert("Extra", 5.0);

        assert_eq!(row.keys().collect::<Vec<_>>(), vec!["Name", "Note", "Extra"]);
        assert_eq!(row.value("Name"), &CellValue::from("Alice"));
    }

    #[test]
    fn test_missing_column_reads_empty() {
        let row = Row::new();
        assert_eq!(row.value("Anything"), &CellValue::Empty);
        assert!(row.get("Anything").is_none());
    }

    #[test]
    fn test_json_preserves_key_order() {
        let json = r#"{"Zeta":"1","Alpha":2,"Mid":null}"#;
        let row: Row = serde_json::from_str(json).unwrap();

        assert_eq!(row.keys().collect::<Vec<_>>(), vec!["Zeta", "Alpha", "Mid"]);
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"{"Zeta":"1","Alpha":2.0,"Mid":null}"#);
    }
}
