//! Expense records, the in-memory ledger, and its derived views.

pub mod category;
pub mod expense;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod views;

pub use category::Category;
pub use expense::{parse_amount, parse_date, Expense, ExpenseDraft, ExpenseId, MAX_AMOUNT};
pub use ledger::Ledger;
pub use views::{CategoryTotal, DailyPoint, MonthBucket, QuickStats, SortKey};
