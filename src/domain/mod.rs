pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod metrics_config;
pub mod pivot;

// Rows, cells and schema types of the harmonization pipeline
pub mod harmonized;
