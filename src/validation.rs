use chrono::{DateTime, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
    // Decimal literals with an optional exponent, signed Infinity, or an
    // unsigned 0x / 0o / 0b integer.
    static ref NUMBER_REGEX: Regex = Regex::new(
        r"^(?:[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)|0[xX][0-9a-fA-F]+|0[oO][0-7]+|0[bB][01]+)$"
    )
    .unwrap();
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Declared type of a column. Only edits are checked against it; the stored
/// value stays a string.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    Text,
    Number,
    Email,
    Date,
}

impl ColumnType {
    pub fn validate(&self, value: &str) -> bool {
        match self {
            ColumnType::Text => true,
            ColumnType::Number => is_number(value),
            ColumnType::Email => EMAIL_REGEX.is_match(value),
            ColumnType::Date => is_date(value),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Text => "text",
            ColumnType::Number => "number",
            ColumnType::Email => "email",
            ColumnType::Date => "date",
        };
        f.write_str(name)
    }
}

impl FromStr for ColumnType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(ColumnType::Text),
            "number" => Ok(ColumnType::Number),
            "email" => Ok(ColumnType::Email),
            "date" => Ok(ColumnType::Date),
            other => Err(format!("unknown column type: {}", other)),
        }
    }
}

// Blank counts as zero, so clearing a numeric cell is allowed.
fn is_number(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return true;
    }
    NUMBER_REGEX.is_match(trimmed)
}

fn is_date(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return false;
    }
    DateTime::parse_from_rfc3339(trimmed).is_ok()
        || DateTime::parse_from_rfc2822(trimmed).is_ok()
        || DATE_FORMATS
            .iter()
            .any(|f| NaiveDate::parse_from_str(trimmed, f).is_ok())
        || DATETIME_FORMATS
            .iter()
            .any(|f| NaiveDateTime::parse_from_str(trimmed, f).is_ok())
}
