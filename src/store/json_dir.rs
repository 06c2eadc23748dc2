//! Flat-file store: one pretty-printed JSON file per top-level record.
//!
//! Layout is `<root>/<document>/<block-id>.json`. Each write goes to a
//! temporary file in the same directory and is then renamed over the
//! record, so a record is either fully old or fully new on disk.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::{Store, StoreError, StoreResult};
use crate::block::{Block, BlockId, is_storage_key};

const RECORD_EXTENSION: &str = "json";

/// Directory-backed [`Store`].
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    root: PathBuf,
}

impl JsonDirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Names of every document directory under the root
    pub fn documents(&self) -> StoreResult<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(&self.root, e)),
        };
        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .collect();
        names.sort();
        Ok(names)
    }

    fn document_dir(&self, document: &str) -> StoreResult<PathBuf> {
        check_key(document)?;
        Ok(self.root.join(document))
    }

    fn record_path(&self, document: &str, id: &BlockId) -> StoreResult<PathBuf> {
        check_key(id.as_str())?;
        Ok(self
            .document_dir(document)?
            .join(format!("{}.{}", id, RECORD_EXTENSION)))
    }
}

fn check_key(key: &str) -> StoreResult<()> {
    if !is_storage_key(key) {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}

fn io_error(path: &Path, source: io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl Store for JsonDirStore {
    fn load_all(&self, document: &str) -> StoreResult<Vec<Block>> {
        let dir = self.document_dir(document)?;
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(&dir, e)),
        };

        let mut records = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| io_error(&dir, e))?.path();
            let is_record = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == RECORD_EXTENSION);
            if !is_record || !path.is_file() {
                continue;
            }

            let contents = fs::read_to_string(&path).map_err(|e| io_error(&path, e))?;
            let record: Block = serde_json::from_str(&contents).map_err(|source| StoreError::Serde {
                path: path.clone(),
                source,
            })?;
            records.push(record);
        }

        // directory order is arbitrary
        records.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.id.cmp(&b.id)));
        tracing::debug!(document, records = records.len(), "loaded records");
        Ok(records)
    }

    fn save(&mut self, document: &str, record: &Block) -> StoreResult<()> {
        let path = self.record_path(document, &record.id)?;
        let dir = self.document_dir(document)?;
        fs::create_dir_all(&dir).map_err(|e| io_error(&dir, e))?;

        let contents = serde_json::to_vec_pretty(record).map_err(|source| StoreError::Serde {
            path: path.clone(),
            source,
        })?;

        // Atomic write: write to temp file, then rename
        let mut temp_file = tempfile::NamedTempFile::new_in(&dir).map_err(|e| io_error(&dir, e))?;
        temp_file
            .write_all(&contents)
            .map_err(|e| io_error(temp_file.path(), e))?;
        temp_file
            .flush()
            .map_err(|e| io_error(temp_file.path(), e))?;
        temp_file
            .persist(&path)
            .map_err(|e| io_error(&path, e.error))?;

        tracing::debug!(document, id = %record.id, "saved record");
        Ok(())
    }

    fn delete(&mut self, document: &str, id: &BlockId) -> StoreResult<()> {
        let path = self.record_path(document, id)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(document, %id, "deleted record");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&path, e)),
        }
    }
}
