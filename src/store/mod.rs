//! Persistence adapter.
//!
//! Stores only ever see whole top-level records: a top-level block with
//! its entire nested subtree embedded. There is no nested update primitive.

mod json_dir;

pub use json_dir::JsonDirStore;

use indexmap::IndexMap;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::block::{Block, BlockId};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by a [`Store`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed record {}: {source}", .path.display())]
    Serde {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Document or record name that cannot be used as a storage key
    #[error("invalid storage key `{0}`")]
    InvalidKey(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Key-value store of top-level records, grouped by document.
pub trait Store {
    /// Every top-level record of `document`, in no particular order
    fn load_all(&self, document: &str) -> StoreResult<Vec<Block>>;

    /// Insert or overwrite one whole record
    fn save(&mut self, document: &str, record: &Block) -> StoreResult<()>;

    /// Remove one record; removing a missing record is not an error
    fn delete(&mut self, document: &str, id: &BlockId) -> StoreResult<()>;
}

/// In-memory store.
///
/// Writes can be made to fail on demand, which is how the session's
/// persistence-failure handling is exercised.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: HashMap<String, IndexMap<BlockId, Block>>,
    /// Writes allowed before every further write fails; `None` is unlimited
    write_budget: Option<usize>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document with records
    pub fn with_records(document: &str, records: Vec<Block>) -> Self {
        let mut store = Self::new();
        let entry = store.documents.entry(document.to_string()).or_default();
        for record in records {
            entry.insert(record.id.clone(), record);
        }
        store
    }

    /// Make every following `save`/`delete` fail
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.write_budget = fail.then_some(0);
    }

    /// Let `writes` more writes succeed, then fail the rest
    pub fn fail_after(&mut self, writes: usize) {
        self.write_budget = Some(writes);
    }

    /// Stored record, if any
    pub fn record(&self, document: &str, id: &BlockId) -> Option<&Block> {
        self.documents.get(document)?.get(id)
    }

    /// Number of records stored for `document`
    pub fn count(&self, document: &str) -> usize {
        self.documents.get(document).map_or(0, IndexMap::len)
    }

    /// Successful writes so far (saves and deletes)
    pub fn writes(&self) -> usize {
        self.writes
    }

    fn check_writable(&mut self) -> StoreResult<()> {
        match &mut self.write_budget {
            Some(0) => Err(StoreError::Unavailable("writes disabled".to_string())),
            Some(left) => {
                *left -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl Store for MemoryStore {
    fn load_all(&self, document: &str) -> StoreResult<Vec<Block>> {
        Ok(self
            .documents
            .get(document)
            .map(|records| records.values().cloned().collect())
            .unwrap_or_default())
    }

    fn save(&mut self, document: &str, record: &Block) -> StoreResult<()> {
        self.check_writable()?;
        self.documents
            .entry(document.to_string())
            .or_default()
            .insert(record.id.clone(), record.clone());
        self.writes += 1;
        Ok(())
    }

    fn delete(&mut self, document: &str, id: &BlockId) -> StoreResult<()> {
        self.check_writable()?;
        if let Some(records) = self.documents.get_mut(document) {
            records.shift_remove(id);
        }
        self.writes += 1;
        Ok(())
    }
}
