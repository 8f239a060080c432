//! Display formatting for amounts, dates and vote scores.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// How whole-unit amounts are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    pub code: String,
    pub symbol: String,
    pub grouping_separator: char,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            code: "VND".into(),
            symbol: "₫".into(),
            grouping_separator: '.',
        }
    }
}

/// `35000` → `35.000 ₫`.
pub fn format_currency(amount: i64, format: &CurrencyFormat) -> String {
    let body = group_digits(&amount.unsigned_abs().to_string(), format.grouping_separator);
    let sign = if amount < 0 { "-" } else { "" };
    if format.symbol.is_empty() {
        format!("{}{} {}", sign, body, format.code)
    } else {
        format!("{}{} {}", sign, body, format.symbol)
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.len();
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// `2024-05-30` → `30/05/2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Short day label used on the trend chart, e.g. `30/5`.
pub fn format_day_label(date: NaiveDate) -> String {
    format!("{}/{}", date.day(), date.month())
}

/// Month label used on the monthly chart, `T1` to `T12`.
pub fn month_label(month: u32) -> String {
    format!("T{}", month)
}

/// Positive scores carry an explicit plus sign.
pub fn format_vote(votes: i64) -> String {
    if votes > 0 {
        format!("+{}", votes)
    } else {
        votes.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteTone {
    Positive,
    Negative,
    Neutral,
}

impl VoteTone {
    pub fn from_votes(votes: i64) -> Self {
        match votes.signum() {
            1 => VoteTone::Positive,
            -1 => VoteTone::Negative,
            _ => VoteTone::Neutral,
        }
    }
}
