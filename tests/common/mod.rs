#![allow(dead_code)]

use chrono::{NaiveDate, TimeZone, Utc};
use expense_ledger::{
    core::{ExpenseTracker, FixedClock},
    ledger::{Category, ExpenseDraft},
    storage::MemoryStorage,
};
use std::sync::Arc;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn draft(name: &str, amount: i64, category: Category, day: NaiveDate) -> ExpenseDraft {
    ExpenseDraft::new(name, amount, category, day)
}

/// Tracker over in-memory storage with the clock frozen at 2024-06-15 12:00 UTC.
pub fn memory_tracker() -> (ExpenseTracker, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let clock = FixedClock(Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap());
    let tracker = ExpenseTracker::open_with_clock(Box::new(Arc::clone(&storage)), Box::new(clock))
        .expect("open tracker");
    (tracker, storage)
}
