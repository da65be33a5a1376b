// Harmonization pipeline
pub mod column_profiler;
pub mod harmonizer;
pub mod record_merger;
pub mod row_reassembler;

// Consumers of harmonized rows
pub mod dataset_catalog;
pub mod metrics_extractor;
pub mod pivot_generator;
pub mod row_filter;
