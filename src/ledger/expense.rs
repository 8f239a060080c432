use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::category::Category;
use crate::errors::{LedgerError, Result};

/// Identifier of an expense: creation time in milliseconds since the epoch,
/// bumped when needed so that ids stay unique and increasing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ExpenseId(pub i64);

impl ExpenseId {
    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ExpenseId {
    type Err = LedgerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(ExpenseId)
            .map_err(|_| LedgerError::validation(format!("`{}` is not a valid expense id", s)))
    }
}

/// One logged spending event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    pub name: String,
    pub amount: i64,
    pub category: Category,
    pub date: NaiveDate,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub votes: i64,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    pub(crate) fn from_draft(id: ExpenseId, draft: ExpenseDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            amount: draft.amount,
            category: draft.category,
            date: draft.date,
            note: draft.note,
            votes: 0,
            created_at,
        }
    }

    /// Replaces every user-editable field, leaving `id`, `votes` and
    /// `created_at` untouched.
    pub(crate) fn apply(&mut self, draft: ExpenseDraft) {
        self.name = draft.name;
        self.amount = draft.amount;
        self.category = draft.category;
        self.date = draft.date;
        self.note = draft.note;
    }

    /// Builds a draft carrying this expense's current editable values.
    pub fn to_draft(&self) -> ExpenseDraft {
        ExpenseDraft {
            name: self.name.clone(),
            amount: self.amount,
            category: self.category.clone(),
            date: self.date,
            note: self.note.clone(),
        }
    }
}

/// Client-supplied fields for creating or editing an expense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub name: String,
    pub amount: i64,
    pub category: Category,
    pub date: NaiveDate,
    pub note: String,
}

impl ExpenseDraft {
    pub fn new(
        name: impl Into<String>,
        amount: i64,
        category: Category,
        date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            category,
            date,
            note: String::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Trims text fields and checks the name and amount, returning the
    /// normalised draft.
    pub fn validated(mut self) -> Result<Self> {
        self.name = self.name.trim().to_string();
        self.note = self.note.trim().to_string();
        if self.name.is_empty() {
            return Err(LedgerError::validation("expense name must not be empty"));
        }
        if self.amount <= 0 {
            return Err(LedgerError::validation(format!(
                "amount must be a positive whole number, got {}",
                self.amount
            )));
        }
        if self.amount > MAX_AMOUNT {
            return Err(LedgerError::validation(format!(
                "amount must not exceed {}, got {}",
                MAX_AMOUNT, self.amount
            )));
        }
        Ok(self)
    }
}

/// Largest amount a single expense may carry.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Parses a whole-unit amount typed by a user, e.g. `35000`.
pub fn parse_amount(input: &str) -> Result<i64> {
    let trimmed = input.trim();
    trimmed.parse::<i64>().map_err(|_| {
        LedgerError::validation(format!("amount `{}` is not a whole number", trimmed))
    })
}

/// Parses an ISO calendar date (`YYYY-MM-DD`).
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
        LedgerError::validation(format!("date `{}` must use the YYYY-MM-DD format", trimmed))
    })
}
