use std::collections::HashSet;

use chrono::{DateTime, Utc};

use super::expense::{Expense, ExpenseDraft, ExpenseId};
use crate::errors::{LedgerError, Result};

/// Ordered collection of expenses, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    expenses: Vec<Expense>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from persisted records, keeping their order.
    ///
    /// Records whose id repeats an earlier record are dropped so that ids
    /// stay unique.
    pub fn from_expenses(expenses: Vec<Expense>) -> Self {
        let mut seen = HashSet::with_capacity(expenses.len());
        let mut kept = Vec::with_capacity(expenses.len());
        for expense in expenses {
            if seen.insert(expense.id) {
                kept.push(expense);
            } else {
                tracing::warn!(id = %expense.id, "dropping expense with duplicate id");
            }
        }
        Self { expenses: kept }
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn get(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    fn get_mut(&mut self, id: ExpenseId) -> Result<&mut Expense> {
        self.expenses
            .iter_mut()
            .find(|expense| expense.id == id)
            .ok_or(LedgerError::NotFound(id))
    }

    /// Validates the draft and inserts it at the front of the ledger.
    pub fn add(&mut self, draft: ExpenseDraft, now: DateTime<Utc>) -> Result<ExpenseId> {
        let draft = draft.validated()?;
        let id = self.next_id(now);
        self.expenses.insert(0, Expense::from_draft(id, draft, now));
        tracing::debug!(%id, "expense added");
        Ok(id)
    }

    /// Replaces the editable fields of an existing expense.
    pub fn edit(&mut self, id: ExpenseId, draft: ExpenseDraft) -> Result<()> {
        let draft = draft.validated()?;
        self.get_mut(id)?.apply(draft);
        tracing::debug!(%id, "expense edited");
        Ok(())
    }

    /// Removes an expense permanently, returning it.
    pub fn delete(&mut self, id: ExpenseId) -> Result<Expense> {
        let index = self
            .expenses
            .iter()
            .position(|expense| expense.id == id)
            .ok_or(LedgerError::NotFound(id))?;
        tracing::debug!(%id, "expense deleted");
        Ok(self.expenses.remove(index))
    }

    /// Adds one vote and returns the new score.
    pub fn upvote(&mut self, id: ExpenseId) -> Result<i64> {
        let expense = self.get_mut(id)?;
        expense.votes += 1;
        Ok(expense.votes)
    }

    /// Removes one vote and returns the new score.
    pub fn downvote(&mut self, id: ExpenseId) -> Result<i64> {
        let expense = self.get_mut(id)?;
        expense.votes -= 1;
        Ok(expense.votes)
    }

    /// Empties the ledger, returning how many expenses were removed.
    pub fn clear_all(&mut self) -> usize {
        let removed = self.expenses.len();
        self.expenses.clear();
        tracing::debug!(removed, "ledger cleared");
        removed
    }

    fn next_id(&self, now: DateTime<Utc>) -> ExpenseId {
        let candidate = now.timestamp_millis();
        match self.expenses.iter().map(|expense| expense.id.0).max() {
            Some(highest) if highest >= candidate => ExpenseId(highest + 1),
            _ => ExpenseId(candidate),
        }
    }
}
