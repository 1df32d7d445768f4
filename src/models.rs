use chrono::NaiveDateTime;

use crate::parser::TransactionKind;

/// Timestamp layout used in the `created_at` columns. Sorts lexicographically.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub sort_order: i64,
}

/// A stored transaction joined with its category name.
#[derive(Debug, Clone)]
pub struct TransactionRecord {
    pub id: i64,
    pub amount: f64,
    pub description: String,
    pub kind: TransactionKind,
    pub category: String,
    pub created_at: NaiveDateTime,
}

pub fn format_timestamp(at: &NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).ok()
}
