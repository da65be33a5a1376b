use once_cell::sync::Lazy;
use regex::Regex;

use super::date_normalizer::try_parse_date;
use crate::domain::harmonized::TokenType;

static LONG_DIGITS_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{8,}$").unwrap());

static ASCII_LETTER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-zA-Z]").unwrap());

static DECIMAL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").unwrap());

/// Classify one token. Rules are ordered, first match wins:
/// 1. parses as a date
/// 2. eight or more digits (ID-like numbers)
/// 3. contains an ASCII letter
/// 4. plain integer or decimal
pub fn classify_token(token: &str) -> TokenType {
    if try_parse_date(token).is_some() {
        return TokenType::Date;
    }
    if LONG_DIGITS_PATTERN.is_match(token) {
        return TokenType::Number;
    }
    if ASCII_LETTER_PATTERN.is_match(token) {
        return TokenType::Text;
    }
    if DECIMAL_PATTERN.is_match(token) {
        return TokenType::Number;
    }
    TokenType::Unknown
}
