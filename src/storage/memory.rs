use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::{
    errors::{LedgerError, Result},
    ledger::Expense,
};

use super::StorageBackend;

/// Keeps the stored entry in process memory.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entry: Mutex<Option<Vec<Expense>>>,
    fail_saves: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(expenses: Vec<Expense>) -> Self {
        Self {
            entry: Mutex::new(Some(expenses)),
            ..Self::default()
        }
    }

    /// Makes subsequent saves fail with an IO error until reset.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Option<Vec<Expense>> {
        self.entry.lock().ok().and_then(|guard| guard.clone())
    }
}

impl StorageBackend for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<Expense>>> {
        let guard = self
            .entry
            .lock()
            .map_err(|_| LedgerError::Io(std::io::Error::other("memory storage poisoned")))?;
        Ok(guard.clone())
    }

    fn save(&self, expenses: &[Expense]) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(LedgerError::Io(std::io::Error::other(
                "memory storage rejected the write",
            )));
        }
        let mut guard = self
            .entry
            .lock()
            .map_err(|_| LedgerError::Io(std::io::Error::other("memory storage poisoned")))?;
        *guard = Some(expenses.to_vec());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
