use crate::error::Result;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::debug;

/// Identity of a file's content without hashing it
///
/// Length plus modification time is enough to notice the open-data portal
/// republishing a dataset; a match means the cached parse is still valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileSignature {
    len: u64,
    modified: Option<SystemTime>,
}

impl FileSignature {
    fn probe(path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path)?;
        Ok(Self {
            len: metadata.len(),
            modified: metadata.modified().ok(),
        })
    }
}

/// Memoizes parsed tables by source path and file signature
///
/// Owned by the loading component and passed explicitly; hits hand back a
/// shared snapshot, misses re-parse and replace the entry.
pub struct TableCache<T> {
    entries: HashMap<PathBuf, (FileSignature, Arc<T>)>,
}

impl<T> TableCache<T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Return the cached table for `path`, or parse it with `load`
    pub fn get_or_load<F>(&mut self, path: &Path, load: F) -> Result<Arc<T>>
    where
        F: FnOnce(&Path) -> Result<T>,
    {
        let signature = FileSignature::probe(path)?;
        let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        if let Some((cached_signature, table)) = self.entries.get(&key) {
            if *cached_signature == signature {
                debug!(path = %key.display(), "table cache hit");
                return Ok(Arc::clone(table));
            }
            debug!(path = %key.display(), "table cache stale, re-parsing");
        }

        let table = Arc::new(load(path)?);
        self.entries.insert(key, (signature, Arc::clone(&table)));
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for TableCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
