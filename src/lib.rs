pub mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use app::run;
pub use application::{
    extract_dashboard_metrics, generate_pivot, harmonize_rows, DatasetCatalog, MetricsExtractor,
};
pub use domain::error::{AppError, Result};
pub use domain::harmonized::{CellValue, HarmonizedData, Row};
