// ============================================================
// ROW RE-ASSEMBLER
// ============================================================
// Second pass: route every token of a merged row to its target column

use crate::domain::harmonized::{CellValue, ExpansionMap, Row, TokenType};
use crate::infrastructure::cells::{classify_token, tokenize, try_parse_date};

const SUB_COLUMN_SEPARATOR: &str = "; ";

/// Rebuild one merged row against the expanded schema.
///
/// Unsplit columns get their tokens joined by a single space. Split columns
/// start out empty and receive each token according to its own
/// classification; dates are normalized to `DD/MM/YYYY` when possible.
/// Tokens whose type has no sub-column are dropped.
pub fn reassemble_row(row: &Row, original_headers: &[String], expansion: &ExpansionMap) -> Row {
    let mut out = Row::with_capacity(original_headers.len());

    for header in original_headers {
        let tokens = tokenize(row.value(header));
        let targets = match expansion.targets(header) {
            Some(targets) if !targets.is_empty() => targets,
            _ => std::slice::from_ref(header),
        };

        if let [single] = targets {
            out.insert(single.as_str(), CellValue::Text(tokens.join(" ")));
            continue;
        }

        for target in targets {
            out.insert(target.as_str(), CellValue::Text(String::new()));
        }

        for token in tokens {
            let kind = classify_token(&token);
            let value = match kind {
                TokenType::Date => try_parse_date(&token).unwrap_or(token),
                _ => token,
            };

            let Some(target) = kind.sub_column_name(header) else {
                continue;
            };
            if !targets.contains(&target) {
                continue;
            }
            append_value(&mut out, &target, &value);
        }
    }

    out
}

fn append_value(row: &mut Row, target: &str, value: &str) {
    let existing = row.value(target).to_text();
    let combined = if existing.is_empty() {
        value.to_string()
    } else {
        format!("{}{}{}", existing, SUB_COLUMN_SEPARATOR, value)
    };
    row.insert(target, CellValue::Text(combined));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_map() -> (Vec<String>, ExpansionMap) {
        let headers = vec!["Name".to_string(), "ID".to_string()];
        let mut map = ExpansionMap::new();
        map.push("Name", vec!["Name".to_string()]);
        map.push(
            "ID",
            vec![
                "ID (Text)".to_string(),
                "ID (Number)".to_string(),
                "ID (Date)".to_string(),
            ],
        );
        (headers, map)
    }

    fn text(value: &str) -> CellValue {
        CellValue::from(value)
    }

    #[test]
    fn test_unsplit_column_joins_with_space() {
        let (headers, map) = split_map();
        let row: Row = [("Name", "Bob,\nSmith"), ("ID", "")].into_iter().collect();

        let out = reassemble_row(&row, &headers, &map);
        assert_eq!(out.value("Name"), &text("Bob Smith"));
    }

    #[test]
    fn test_tokens_route_by_their_own_type() {
        let (headers, map) = split_map();
        let row: Row = [("Name", "Bob"), ("ID", "123\nabc; 5/1/2024")]
            .into_iter()
            .collect();

        let out = reassemble_row(&row, &headers, &map);
        assert_eq!(out.value("ID (Number)"), &text("123"));
        assert_eq!(out.value("ID (Text)"), &text("abc"));
        assert_eq!(out.value("ID (Date)"), &text("05/01/2024"));
    }

    #[test]
    fn test_multiple_tokens_join_with_semicolon() {
        let (headers, map) = split_map();
        let row: Row = [("Name", "Bob"), ("ID", "1, 2, x")].into_iter().collect();

        let out = reassemble_row(&row, &headers, &map);
        assert_eq!(out.value("ID (Number)"), &text("1; 2"));
        assert_eq!(out.value("ID (Text)"), &text("x"));
        assert_eq!(out.value("ID (Date)"), &text(""));
    }

    #[test]
    fn test_output_follows_header_order() {
        let (headers, map) = split_map();
        let row: Row = [("ID", "abc"), ("Name", "Bob")].into_iter().collect();

        let out = reassemble_row(&row, &headers, &map);
        assert_eq!(out.keys().collect::<Vec<_>>(), map.headers());
    }

    #[test]
    fn test_unroutable_tokens_are_dropped() {
        let headers = vec!["Key".to_string(), "Phone".to_string()];
        let mut map = ExpansionMap::new();
        map.push("Key", vec!["Key".to_string()]);
        map.push("Phone", vec!["Phone (Text)".to_string()]);
        let mut map_two = ExpansionMap::new();
        map_two.push("Key", vec!["Key".to_string()]);
        map_two.push(
            "Phone",
            vec!["Phone (Text)".to_string(), "Phone (Number)".to_string()],
        );

        let row: Row = [("Key", "k"), ("Phone", "-5, call, 12/05/2023")]
            .into_iter()
            .collect();

        let out = reassemble_row(&row, &headers, &map_two);
        assert_eq!(out.value("Phone (Text)"), &text("call"));
        assert_eq!(out.value("Phone (Number)"), &text(""));
        assert!(!out.contains_key("Phone (Date)"));

        // a single target keeps every token, Unknown included
        let out = reassemble_row(&row, &headers, &map);
        assert_eq!(out.value("Phone (Text)"), &text("-5 call 12/05/2023"));
    }
}
