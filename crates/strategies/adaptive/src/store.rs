//! Weight table persistence.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use thiserror::Error;
use tracing::warn;

use crate::weights::WeightTable;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write weights: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode weights: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Abstract key-value persistence for weight tables. Keys and encoding are
/// the store's business; a missing or unreadable entry is simply absent, so
/// a corrupted file can never take the strategy down.
pub trait WeightStore {
    fn load(&self, key: &str) -> Option<WeightTable>;
    fn save(&mut self, key: &str, table: &WeightTable) -> Result<(), StoreError>;
}

/// One JSON file per key under a base directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl WeightStore for FileStore {
    fn load(&self, key: &str) -> Option<WeightTable> {
        let path = self.path_for(key);
        let contents = fs::read_to_string(&path).ok()?;
        match serde_json::from_str::<WeightTable>(&contents) {
            Ok(table) if table.is_consistent() => Some(table),
            Ok(_) => {
                warn!(path = %path.display(), "weight table dimensions are inconsistent, ignoring");
                None
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corrupt weight table, ignoring");
                None
            }
        }
    }

    fn save(&mut self, key: &str, table: &WeightTable) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(table)?;
        fs::write(self.path_for(key), json)?;
        Ok(())
    }
}

/// In-memory store for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryStore {
    tables: HashMap<String, WeightTable>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&WeightTable> {
        self.tables.get(key)
    }
}

impl WeightStore for MemoryStore {
    fn load(&self, key: &str) -> Option<WeightTable> {
        self.tables.get(key).cloned()
    }

    fn save(&mut self, key: &str, table: &WeightTable) -> Result<(), StoreError> {
        self.tables.insert(key.to_string(), table.clone());
        Ok(())
    }
}

/// Lets a store be shared between a strategy and whoever inspects it.
impl<S: WeightStore> WeightStore for Rc<RefCell<S>> {
    fn load(&self, key: &str) -> Option<WeightTable> {
        self.borrow().load(key)
    }

    fn save(&mut self, key: &str, table: &WeightTable) -> Result<(), StoreError> {
        self.borrow_mut().save(key, table)
    }
}
