use chrono::NaiveDate;

use crate::{
    errors::Result,
    ledger::{DailyPoint, Expense, ExpenseDraft, ExpenseId, Ledger},
    storage::StorageBackend,
};

use super::clock::{Clock, SystemClock};

/// Owns the ledger for the lifetime of the application and mirrors every
/// mutation to storage.
///
/// A mutation that succeeds in memory stays applied even when the following
/// save fails; the save error is returned and the next successful save writes
/// the whole ledger again.
pub struct ExpenseTracker {
    ledger: Ledger,
    storage: Box<dyn StorageBackend>,
    clock: Box<dyn Clock>,
}

impl ExpenseTracker {
    /// Loads the stored ledger, starting empty when nothing was saved yet.
    pub fn open(storage: Box<dyn StorageBackend>) -> Result<Self> {
        Self::open_with_clock(storage, Box::new(SystemClock))
    }

    pub fn open_with_clock(storage: Box<dyn StorageBackend>, clock: Box<dyn Clock>) -> Result<Self> {
        let ledger = match storage.load()? {
            Some(expenses) => Ledger::from_expenses(expenses),
            None => Ledger::new(),
        };
        tracing::info!(count = ledger.len(), "expense tracker opened");
        Ok(Self {
            ledger,
            storage,
            clock,
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn add(&mut self, draft: ExpenseDraft) -> Result<ExpenseId> {
        let id = self.ledger.add(draft, self.clock.now())?;
        self.persist()?;
        Ok(id)
    }

    pub fn edit(&mut self, id: ExpenseId, draft: ExpenseDraft) -> Result<()> {
        self.ledger.edit(id, draft)?;
        self.persist()
    }

    pub fn delete(&mut self, id: ExpenseId) -> Result<Expense> {
        let removed = self.ledger.delete(id)?;
        self.persist()?;
        Ok(removed)
    }

    pub fn upvote(&mut self, id: ExpenseId) -> Result<i64> {
        let votes = self.ledger.upvote(id)?;
        self.persist()?;
        Ok(votes)
    }

    pub fn downvote(&mut self, id: ExpenseId) -> Result<i64> {
        let votes = self.ledger.downvote(id)?;
        self.persist()?;
        Ok(votes)
    }

    pub fn clear_all(&mut self) -> Result<usize> {
        let removed = self.ledger.clear_all();
        self.persist()?;
        Ok(removed)
    }

    /// Spending in the current calendar month.
    pub fn month_to_date_spend(&self) -> i64 {
        self.ledger.month_to_date_spend(self.today())
    }

    /// Daily totals for the last `days` days, ending today.
    pub fn daily_trend(&self, days: usize) -> Vec<DailyPoint> {
        self.ledger.daily_trend(days, self.today())
    }

    /// Writes the ledger one final time and releases the storage.
    pub fn close(self) -> Result<Box<dyn StorageBackend>> {
        self.persist()?;
        tracing::debug!(count = self.ledger.len(), "expense tracker closed");
        Ok(self.storage)
    }

    fn persist(&self) -> Result<()> {
        self.storage.save(self.ledger.expenses()).map_err(|err| {
            tracing::warn!(error = %err, "failed to save ledger");
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::errors::LedgerError;
    use crate::ledger::Category;
    use crate::storage::MemoryStorage;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    fn clock() -> Box<dyn Clock> {
        Box::new(FixedClock(Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap()))
    }

    fn draft(name: &str, amount: i64) -> ExpenseDraft {
        ExpenseDraft::new(
            name,
            amount,
            Category::Food,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        )
    }

    fn tracker() -> (ExpenseTracker, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let tracker =
            ExpenseTracker::open_with_clock(Box::new(Arc::clone(&storage)), clock()).unwrap();
        (tracker, storage)
    }

    #[test]
    fn open_without_stored_data_starts_empty() {
        let (tracker, storage) = tracker();
        assert!(tracker.ledger().is_empty());
        assert_eq!(storage.save_count(), 0);
    }

    #[test]
    fn open_keeps_seeded_order() {
        let mut source = Ledger::new();
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let older = source.add(draft("Older", 1_000), now).unwrap();
        let newer = source.add(draft("Newer", 2_000), now).unwrap();
        let storage = MemoryStorage::seeded(source.expenses().to_vec());

        let tracker = ExpenseTracker::open_with_clock(Box::new(storage), clock()).unwrap();
        let ids: Vec<ExpenseId> = tracker.ledger().expenses().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![newer, older]);
    }

    #[test]
    fn every_mutation_is_saved() {
        let (mut tracker, storage) = tracker();
        let id = tracker.add(draft("Coffee", 25_000)).unwrap();
        tracker.upvote(id).unwrap();
        tracker.downvote(id).unwrap();
        tracker.edit(id, draft("Tea", 20_000)).unwrap();
        tracker.delete(id).unwrap();
        tracker.clear_all().unwrap();
        assert_eq!(storage.save_count(), 6);
        assert_eq!(storage.snapshot(), Some(Vec::new()));
    }

    #[test]
    fn failed_lookup_does_not_save() {
        let (mut tracker, storage) = tracker();
        let err = tracker.upvote(ExpenseId(7)).expect_err("missing id");
        assert!(matches!(err, LedgerError::NotFound(_)));
        assert_eq!(storage.save_count(), 0);
    }

    #[test]
    fn save_failure_is_surfaced_and_state_is_kept() {
        let (mut tracker, storage) = tracker();
        storage.set_fail_saves(true);
        let err = tracker.add(draft("Coffee", 25_000)).expect_err("save must fail");
        assert!(err.is_storage());
        assert_eq!(tracker.ledger().len(), 1);

        storage.set_fail_saves(false);
        let id = tracker.ledger().expenses()[0].id;
        tracker.upvote(id).unwrap();
        assert_eq!(storage.snapshot().unwrap().len(), 1);
    }

    #[test]
    fn reopen_restores_saved_ledger() {
        let (mut tracker, storage) = tracker();
        let id = tracker.add(draft("Coffee", 25_000)).unwrap();
        tracker.upvote(id).unwrap();
        drop(tracker.close().unwrap());

        let reopened =
            ExpenseTracker::open_with_clock(Box::new(Arc::clone(&storage)), clock()).unwrap();
        assert_eq!(reopened.ledger().get(id).unwrap().votes, 1);
        assert_eq!(reopened.month_to_date_spend(), 25_000);
        assert_eq!(reopened.daily_trend(7).last().unwrap().amount, 25_000);
    }
}
