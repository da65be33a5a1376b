use serde::{Deserialize, Serialize};

use super::harmonized::HarmonizedData;

/// Name given to datasets registered without one
pub const DEFAULT_DATASET_NAME: &str = "Imported_Sheet";

/// A named, harmonized sheet held in a catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub id: String,
    pub name: String,
    pub data: HarmonizedData,
}

/// Lightweight listing entry for a dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    pub id: String,
    pub name: String,
    pub row_count: usize,
    pub headers: Vec<String>,
}

impl From<&Dataset> for DatasetSummary {
    fn from(dataset: &Dataset) -> Self {
        Self {
            id: dataset.id.clone(),
            name: dataset.name.clone(),
            row_count: dataset.data.row_count(),
            headers: dataset.data.headers.clone(),
        }
    }
}
