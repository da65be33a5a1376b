// ============================================================
// HARMONIZED DATA DOMAIN LAYER
// ============================================================
// Rows, cells and schema types shared by the harmonizer, metrics
// and pivot use cases. No I/O.

mod cell_value;
mod expansion;
mod row;
mod token_type;

pub use cell_value::CellValue;
pub use expansion::{ColumnTypeSet, ExpansionMap, HarmonizedData};
pub use row::Row;
pub use token_type::{TokenType, DATE_COLUMN_MARKER};
