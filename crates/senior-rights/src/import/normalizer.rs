use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use std::str::FromStr;

pub(crate) fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" | "1" | "o" => Some(true),
        "n" | "no" | "false" | "0" | "x" => Some(false),
        _ => None,
    }
}

/// Accepts thousands separators and a trailing currency unit.
pub(crate) fn parse_amount(value: &str) -> Option<Decimal> {
    let cleaned: String = value
        .trim()
        .trim_end_matches('원')
        .chars()
        .filter(|ch| *ch != ',' && !ch.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned).ok()
}

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    ["%Y-%m-%d", "%Y.%m.%d", "%Y/%m/%d"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}
