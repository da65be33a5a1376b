use serde::{Deserialize, Serialize};

/// Marker that every date sub-column carries in its name. Downstream
/// consumers locate expiry-tracking columns by this substring.
pub const DATE_COLUMN_MARKER: &str = "(Date)";

/// Classification of a single cell token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TokenType {
    Date,
    Number,
    Text,
    Unknown,
}

impl TokenType {
    /// Order in which sub-columns are laid out when a column is split
    pub const SPLIT_ORDER: [TokenType; 3] = [TokenType::Text, TokenType::Number, TokenType::Date];

    /// Suffix of the sub-column this type routes to. Unknown has none.
    pub fn sub_column_suffix(&self) -> Option<&'static str> {
        match self {
            TokenType::Text => Some(" (Text)"),
            TokenType::Number => Some(" (Number)"),
            TokenType::Date => Some(" (Date)"),
            TokenType::Unknown => None,
        }
    }

    pub fn sub_column_name(&self, header: &str) -> Option<String> {
        self.sub_column_suffix()
            .map(|suffix| format!("{}{}", header, suffix))
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenType::Date => write!(f, "Date"),
            TokenType::Number => write!(f, "Number"),
            TokenType::Text => write!(f, "Text"),
            TokenType::Unknown => write!(f, "Unknown"),
        }
    }
}
