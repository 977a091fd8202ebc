use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Display-only formatting for a column. The stored value is never changed.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CellFormat {
    Currency,
    Percentage,
    Date,
}

impl CellFormat {
    /// Formats `value`, or returns it untouched if it does not parse.
    pub fn apply(&self, value: &str) -> String {
        match self {
            CellFormat::Currency => match parse_number(value) {
                Some(n) => format!("${:.2}", n),
                None => value.to_string(),
            },
            CellFormat::Percentage => match parse_number(value) {
                Some(n) => format!("{:.2}%", n * 100.0),
                None => value.to_string(),
            },
            CellFormat::Date => match parse_date(value) {
                Some(d) => d.format("%-m/%-d/%Y").to_string(),
                None => value.to_string(),
            },
        }
    }
}

fn parse_number(value: &str) -> Option<f64> {
    let n = value.trim().parse::<f64>().ok()?;
    n.is_finite().then_some(n)
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"]
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(trimmed, f).ok())
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.date_naive())
        })
}
