use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, write_atomic},
    errors::{LedgerError, Result},
    ledger::Expense,
};

use super::StorageBackend;

const FILE_EXTENSION: &str = "json";

pub const CURRENT_SCHEMA_VERSION: u32 = 1;
pub const DEFAULT_STORAGE_KEY: &str = "studentExpenses";

/// Versioned envelope written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredLedger {
    pub schema_version: u32,
    pub expenses: Vec<Expense>,
}

/// Accepted on-disk shapes: the versioned envelope, or the bare array
/// written before versioning existed. Records stay raw until the version
/// is known to be readable.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawShape {
    Versioned(RawEnvelope),
    Legacy(Vec<serde_json::Value>),
}

#[derive(Deserialize)]
struct RawEnvelope {
    schema_version: u32,
    expenses: serde_json::Value,
}

/// Stores the ledger as one JSON file per storage key.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(root: impl Into<PathBuf>, key: &str) -> Result<Self> {
        let root = root.into();
        ensure_dir(&root)?;
        let path = root.join(format!("{}.{}", canonical_key(key), FILE_EXTENSION));
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for JsonStorage {
    fn load(&self) -> Result<Option<Vec<Expense>>> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no stored ledger yet");
            return Ok(None);
        }
        let data = fs::read_to_string(&self.path)?;
        let expenses = decode(&data)?;
        tracing::info!(
            path = %self.path.display(),
            count = expenses.len(),
            "ledger loaded"
        );
        Ok(Some(expenses))
    }

    fn save(&self, expenses: &[Expense]) -> Result<()> {
        let json = encode(expenses)?;
        write_atomic(&self.path, &json)?;
        tracing::debug!(path = %self.path.display(), count = expenses.len(), "ledger saved");
        Ok(())
    }
}

/// Serializes expenses inside the current versioned envelope.
pub fn encode(expenses: &[Expense]) -> Result<String> {
    let stored = StoredLedger {
        schema_version: CURRENT_SCHEMA_VERSION,
        expenses: expenses.to_vec(),
    };
    Ok(serde_json::to_string_pretty(&stored)?)
}

/// Parses either stored shape, rejecting envelopes from a newer schema.
pub fn decode(data: &str) -> Result<Vec<Expense>> {
    match serde_json::from_str::<RawShape>(data)? {
        RawShape::Versioned(envelope) => {
            if envelope.schema_version > CURRENT_SCHEMA_VERSION {
                return Err(LedgerError::UnsupportedSchema {
                    found: envelope.schema_version,
                    supported: CURRENT_SCHEMA_VERSION,
                });
            }
            Ok(serde_json::from_value(envelope.expenses)?)
        }
        RawShape::Legacy(records) => {
            tracing::info!(
                count = records.len(),
                "read unversioned ledger; it will be upgraded on the next save"
            );
            Ok(serde_json::from_value(serde_json::Value::Array(records))?)
        }
    }
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        DEFAULT_STORAGE_KEY.into()
    } else {
        sanitized
    }
}
