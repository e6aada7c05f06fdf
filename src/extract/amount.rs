use crate::errors::{StatementParseError, StatementResult};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a statement amount such as `1,234.50+`, `50-` or `-12.5`.
///
/// Thousands separators are dropped; a trailing `+` or `-` carries the sign.
pub fn normalize_amount(raw: &str) -> StatementResult<Decimal> {
    let cleaned = raw.replace(',', "");
    let cleaned = cleaned.trim();

    let invalid = || StatementParseError::AmountInvalid(raw.to_string());

    if let Some(prefix) = cleaned.strip_suffix('+') {
        parse_decimal(prefix).ok_or_else(invalid)
    } else if let Some(prefix) = cleaned.strip_suffix('-') {
        parse_decimal(prefix).map(|v| -v).ok_or_else(invalid)
    } else {
        parse_decimal(cleaned).ok_or_else(invalid)
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}
