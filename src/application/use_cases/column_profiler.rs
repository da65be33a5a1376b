// ============================================================
// COLUMN TYPE PROFILER + SCHEMA EXPANDER
// ============================================================
// First pass over merged rows: which token types does each column hold,
// and which columns must be split into typed sub-columns

use tracing::debug;

use crate::domain::harmonized::{ColumnTypeSet, ExpansionMap, Row, TokenType};
use crate::infrastructure::cells::{classify_token, tokenize};

/// Union of the classifications of every token in `header`'s cells
pub fn profile_column(rows: &[Row], header: &str) -> ColumnTypeSet {
    rows.iter()
        .flat_map(|row| tokenize(row.value(header)))
        .map(|token| classify_token(&token))
        .collect()
}

/// Target columns for one original column.
///
/// A column with at most one observed type is kept as-is, whatever that type
/// is. Otherwise one sub-column per Text/Number/Date type present, in that
/// order; Unknown counts toward the split but gets no sub-column.
pub fn expand_column(header: &str, types: &ColumnTypeSet) -> Vec<String> {
    if types.len() <= 1 {
        return vec![header.to_string()];
    }

    TokenType::SPLIT_ORDER
        .iter()
        .filter(|kind| types.contains(*kind))
        .filter_map(|kind| kind.sub_column_name(header))
        .collect()
}

/// Profile every column and build the expansion map. The first column is
/// the record identifier: it is always treated as Text and never split.
pub fn profile_columns(rows: &[Row], original_headers: &[String]) -> ExpansionMap {
    let mut expansion = ExpansionMap::new();

    for (index, header) in original_headers.iter().enumerate() {
        if index == 0 {
            expansion.push(header.clone(), vec![header.clone()]);
            continue;
        }

        let types = profile_column(rows, header);
        expansion.push(header.clone(), expand_column(header, &types));
        if expansion.is_split(header) {
            debug!(
                column = %header,
                ?types,
                targets = ?expansion.targets(header),
                "Splitting mixed-type column"
            );
        }
    }

    expansion
}
