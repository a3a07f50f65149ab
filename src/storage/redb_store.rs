//! Persistent key-value store backed by redb.
//!
//! One table, `kv: key → value`, both UTF-8 strings. Each `get`/`set`/`remove`
//! runs in its own transaction.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use redb::{Database, TableDefinition};

use super::KeyValueStore;

const KV_TABLE: TableDefinition<&str, &str> = TableDefinition::new("kv");

pub struct RedbStore {
    db: Database,
}

impl RedbStore {
    /// Open or create the database at `path`, creating parent directories.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let db = Database::create(path)
            .with_context(|| format!("failed to open store at {}", path.display()))?;
        // Ensure table exists so read transactions never miss it
        let txn = db.begin_write()?;
        { let _ = txn.open_table(KV_TABLE)?; }
        txn.commit()?;
        Ok(Self { db })
    }

    /// Default store path: <data_dir>/cadence/store.redb
    pub fn default_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .context("Failed to get data directory")?
            .join("cadence");
        Ok(data_dir.join("store.redb"))
    }
}

impl KeyValueStore for RedbStore {
    fn backend_name(&self) -> &str {
        "redb"
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(KV_TABLE)?;
        Ok(table.get(key)?.map(|v| v.value().to_string()))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(KV_TABLE)?;
            table.insert(key, value)?;
        }
        txn.commit()
            .with_context(|| format!("failed to commit write of '{}'", key))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(KV_TABLE)?;
            table.remove(key)?;
        }
        txn.commit()
            .with_context(|| format!("failed to commit removal of '{}'", key))?;
        Ok(())
    }
}
