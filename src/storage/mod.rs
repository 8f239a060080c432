pub mod json_backend;
pub mod memory;

use crate::{errors::Result, ledger::Expense};

/// Abstraction over the key-value entry that mirrors the ledger.
pub trait StorageBackend: Send + Sync {
    /// Returns the stored expenses, or `None` when nothing was saved yet.
    fn load(&self) -> Result<Option<Vec<Expense>>>;

    /// Replaces the stored entry with `expenses` wholesale.
    fn save(&self, expenses: &[Expense]) -> Result<()>;
}

pub use json_backend::{JsonStorage, StoredLedger, CURRENT_SCHEMA_VERSION, DEFAULT_STORAGE_KEY};
pub use memory::MemoryStorage;

impl<T: StorageBackend + ?Sized> StorageBackend for std::sync::Arc<T> {
    fn load(&self) -> Result<Option<Vec<Expense>>> {
        (**self).load()
    }

    fn save(&self, expenses: &[Expense]) -> Result<()> {
        (**self).save(expenses)
    }
}
