//! Read-only summaries computed on demand from the current ledger contents.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{category::Category, expense::Expense, ledger::Ledger};
use crate::errors::LedgerError;

/// Ordering applied to the expense table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    DateAsc,
    #[default]
    DateDesc,
    AmountAsc,
    AmountDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::DateDesc,
        SortKey::DateAsc,
        SortKey::AmountDesc,
        SortKey::AmountAsc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::DateAsc => "date-asc",
            SortKey::DateDesc => "date-desc",
            SortKey::AmountAsc => "amount-asc",
            SortKey::AmountDesc => "amount-desc",
        }
    }
}

impl FromStr for SortKey {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == normalized)
            .ok_or_else(|| {
                LedgerError::validation(format!(
                    "unknown sort `{}` (expected date-desc, date-asc, amount-desc or amount-asc)",
                    s.trim()
                ))
            })
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub amount: i64,
}

/// Spending summed over one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthBucket {
    pub year: i32,
    pub month: u32,
    pub amount: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickStats {
    pub max_amount: i64,
    pub min_amount: i64,
    pub average_amount: i64,
    pub top_category: Category,
    pub top_category_count: usize,
}

impl Ledger {
    pub fn total_spend(&self) -> i64 {
        saturating_total(self.expenses().iter().map(|expense| expense.amount))
    }

    /// Spending dated in the same calendar month and year as `reference`.
    pub fn month_to_date_spend(&self, reference: NaiveDate) -> i64 {
        saturating_total(
            self.expenses()
                .iter()
                .filter(|expense| {
                    expense.date.year() == reference.year()
                        && expense.date.month() == reference.month()
                })
                .map(|expense| expense.amount),
        )
    }

    pub fn total_absolute_votes(&self) -> i64 {
        saturating_total(
            self.expenses()
                .iter()
                .map(|expense| expense.votes.saturating_abs()),
        )
    }

    /// Amount per category, in order of each category's first appearance.
    pub fn category_totals(&self) -> Vec<CategoryTotal> {
        let mut totals: Vec<CategoryTotal> = Vec::new();
        for expense in self.expenses() {
            match totals
                .iter_mut()
                .find(|entry| entry.category == expense.category)
            {
                Some(entry) => entry.amount = entry.amount.saturating_add(expense.amount),
                None => totals.push(CategoryTotal {
                    category: expense.category.clone(),
                    amount: expense.amount,
                }),
            }
        }
        totals
    }

    /// The most recent `window` months that have spending, oldest first.
    pub fn monthly_series(&self, window: usize) -> Vec<MonthBucket> {
        let mut buckets: BTreeMap<(i32, u32), i64> = BTreeMap::new();
        for expense in self.expenses() {
            let bucket = buckets
                .entry((expense.date.year(), expense.date.month()))
                .or_default();
            *bucket = bucket.saturating_add(expense.amount);
        }
        let skip = buckets.len().saturating_sub(window);
        buckets
            .into_iter()
            .skip(skip)
            .map(|((year, month), amount)| MonthBucket {
                year,
                month,
                amount,
            })
            .collect()
    }

    /// One point per day for the `days` days ending at `today`, oldest first.
    /// Days before the earliest representable date are left out.
    pub fn daily_trend(&self, days: usize, today: NaiveDate) -> Vec<DailyPoint> {
        (0..days as u64)
            .rev()
            .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
            .map(|date| {
                let amount = saturating_total(
                    self.expenses()
                        .iter()
                        .filter(|expense| expense.date == date)
                        .map(|expense| expense.amount),
                );
                DailyPoint { date, amount }
            })
            .collect()
    }

    /// Expenses for the table view. Ties keep ledger order.
    pub fn filter_sort_for_table(
        &self,
        category: Option<&Category>,
        sort: SortKey,
    ) -> Vec<&Expense> {
        let mut rows: Vec<&Expense> = self
            .expenses()
            .iter()
            .filter(|expense| category.map_or(true, |wanted| &expense.category == wanted))
            .collect();
        match sort {
            SortKey::DateAsc => rows.sort_by_key(|expense| expense.date),
            SortKey::DateDesc => rows.sort_by(|a, b| b.date.cmp(&a.date)),
            SortKey::AmountAsc => rows.sort_by_key(|expense| expense.amount),
            SortKey::AmountDesc => rows.sort_by(|a, b| b.amount.cmp(&a.amount)),
        }
        rows
    }

    /// Highest scored expenses first, at most `limit`. Ties keep ledger order.
    pub fn top_voted(&self, limit: usize) -> Vec<&Expense> {
        let mut rows: Vec<&Expense> = self.expenses().iter().collect();
        rows.sort_by(|a, b| b.votes.cmp(&a.votes));
        rows.truncate(limit);
        rows
    }

    /// The newest `limit` expenses.
    pub fn recent(&self, limit: usize) -> &[Expense] {
        let end = limit.min(self.len());
        &self.expenses()[..end]
    }

    /// Amount extremes, rounded average and most frequent category.
    /// Returns `None` for an empty ledger.
    pub fn quick_stats(&self) -> Option<QuickStats> {
        let expenses = self.expenses();
        let max_amount = expenses.iter().map(|expense| expense.amount).max()?;
        let min_amount = expenses.iter().map(|expense| expense.amount).min()?;
        let count = expenses.len() as i128;
        let sum: i128 = expenses.iter().map(|expense| i128::from(expense.amount)).sum();
        // Half-way values round towards positive infinity.
        let average = (2 * sum + count).div_euclid(2 * count);
        let average_amount = i64::try_from(average).unwrap_or(max_amount);

        let mut counts: Vec<(&Category, usize)> = Vec::new();
        for expense in expenses {
            match counts
                .iter_mut()
                .find(|(category, _)| *category == &expense.category)
            {
                Some((_, n)) => *n += 1,
                None => counts.push((&expense.category, 1)),
            }
        }
        let mut top = counts.first().copied()?;
        for entry in counts.iter().skip(1) {
            if entry.1 > top.1 {
                top = *entry;
            }
        }

        Some(QuickStats {
            max_amount,
            min_amount,
            average_amount,
            top_category: top.0.clone(),
            top_category_count: top.1,
        })
    }
}

fn saturating_total(amounts: impl Iterator<Item = i64>) -> i64 {
    amounts.fold(0, i64::saturating_add)
}
