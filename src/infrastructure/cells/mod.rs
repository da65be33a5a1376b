// ============================================================
// CELL PARSING INFRASTRUCTURE
// ============================================================
// Tokenizing multi-valued cells, classifying tokens, normalizing dates

mod date_normalizer;
mod token_classifier;
mod tokenizer;

pub use date_normalizer::{
    calendar_date, format_date, parse_calendar_token, parse_display_date, parse_serial_date,
    try_parse_date,
};
pub use token_classifier::classify_token;
pub use tokenizer::{tokenize, tokenize_str};
