use thiserror::Error;

use crate::ledger::ExpenseId;

/// Error type that captures ledger, persistence, and configuration failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Expense {0} not found")]
    NotFound(ExpenseId),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Stored data uses schema version {found}, newest supported is {supported}")]
    UnsupportedSchema { found: u32, supported: u32 },
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LedgerError {
    pub fn validation(message: impl Into<String>) -> Self {
        LedgerError::Validation(message.into())
    }

    /// True for failures raised by the storage layer rather than by input.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            LedgerError::Io(_) | LedgerError::Serde(_) | LedgerError::UnsupportedSchema { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
