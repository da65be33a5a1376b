pub mod use_cases;

pub use use_cases::dataset_catalog::DatasetCatalog;
pub use use_cases::harmonizer::harmonize_rows;
pub use use_cases::metrics_extractor::{extract_dashboard_metrics, MetricsExtractor};
pub use use_cases::pivot_generator::generate_pivot;
pub use use_cases::row_filter::{filter_by_date_range, search_rows, DateRange};
