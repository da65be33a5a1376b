// ============================================================
// DATASET CATALOG
// ============================================================
// In-memory registry of harmonized sheets plus the merged "master" view

use tracing::info;
use uuid::Uuid;

use crate::domain::dataset::{Dataset, DatasetSummary, DEFAULT_DATASET_NAME};
use crate::domain::error::{AppError, Result};
use crate::domain::harmonized::{HarmonizedData, Row};

#[derive(Debug, Default)]
pub struct DatasetCatalog {
    datasets: Vec<Dataset>,
}

impl DatasetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a harmonized sheet and return its id
    pub fn add(&mut self, name: &str, data: HarmonizedData) -> String {
        let name = match name.trim() {
            "" => DEFAULT_DATASET_NAME.to_string(),
            trimmed => trimmed.to_string(),
        };
        let id = Uuid::new_v4().to_string();

        info!(dataset_id = %id, name = %name, rows = data.row_count(), "Registered dataset");
        self.datasets.push(Dataset {
            id: id.clone(),
            name,
            data,
        });
        id
    }

    pub fn get(&self, id: &str) -> Result<&Dataset> {
        self.datasets
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| AppError::NotFound(format!("dataset {}", id)))
    }

    pub fn remove(&mut self, id: &str) -> Result<Dataset> {
        let position = self
            .datasets
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| AppError::NotFound(format!("dataset {}", id)))?;

        info!(dataset_id = %id, "Removed dataset");
        Ok(self.datasets.remove(position))
    }

    pub fn list(&self) -> Vec<DatasetSummary> {
        self.datasets.iter().map(DatasetSummary::from).collect()
    }

    /// All datasets stacked into one sheet. Headers are the union in
    /// first-seen order; original headers likewise.
    pub fn master_view(&self) -> HarmonizedData {
        let mut headers: Vec<String> = Vec::new();
        let mut original_headers: Vec<String> = Vec::new();
        let mut rows: Vec<Row> = Vec::new();

        for dataset in &self.datasets {
            merge_names(&mut headers, &dataset.data.headers);
            merge_names(&mut original_headers, &dataset.data.original_headers);
            rows.extend(dataset.data.rows.iter().cloned());
        }

        HarmonizedData {
            headers,
            rows,
            original_headers,
        }
    }
}

fn merge_names(into: &mut Vec<String>, names: &[String]) {
    for name in names {
        if !into.contains(name) {
            into.push(name.clone());
        }
    }
}
