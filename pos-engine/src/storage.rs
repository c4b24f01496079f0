//! redb-backed JSON blob store
//!
//! Persists engine state as one JSON blob per key, mirroring the
//! per-origin key-value layout the front end reads:
//!
//! | Key | Value | Purpose |
//! |-----|-------|---------|
//! | `pos_cart` | `Vec<LineItem>` | In-progress cart snapshot |
//! | `pos_confirmed_orders` | `Vec<Order>` | Confirmed order history |
//! | `pos_settings` | `Settings` | Tax rate and currency |
//!
//! Writes are fire-and-forget from the engine's perspective: callers log
//! failures and carry on with their in-memory state, which stays
//! authoritative for the session.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use shared::models::Settings;
use shared::order::{LineItem, Order};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Single blob table: key = storage key, value = JSON payload
const BLOBS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("blobs");

const CART_KEY: &str = "pos_cart";
const ORDERS_KEY: &str = "pos_confirmed_orders";
const SETTINGS_KEY: &str = "pos_settings";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Engine state store backed by redb
#[derive(Clone)]
pub struct Storage {
    db: Arc<Database>,
}

impl Storage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(BLOBS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(BLOBS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    fn put(&self, key: &str, payload: &[u8]) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(BLOBS_TABLE)?;
            table.insert(key, payload)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(BLOBS_TABLE)?;
        Ok(table.get(key)?.map(|guard| guard.value().to_vec()))
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(BLOBS_TABLE)?;
            let _ = table.remove(key)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Persist the in-progress cart
    pub fn save_cart(&self, items: &[LineItem]) -> StorageResult<()> {
        self.put(CART_KEY, &serde_json::to_vec(items)?)
    }

    /// Load the persisted cart; a missing blob reads as an empty cart
    pub fn load_cart(&self) -> StorageResult<Vec<LineItem>> {
        match self.get(CART_KEY)? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(Vec::new()),
        }
    }

    /// Drop the persisted cart blob
    pub fn clear_cart(&self) -> StorageResult<()> {
        self.remove(CART_KEY)
    }

    /// Persist the confirmed order history
    pub fn save_orders(&self, orders: &[Order]) -> StorageResult<()> {
        self.put(ORDERS_KEY, &serde_json::to_vec(orders)?)
    }

    /// Load the order history; a missing blob reads as an empty history
    pub fn load_orders(&self) -> StorageResult<Vec<Order>> {
        match self.get(ORDERS_KEY)? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(Vec::new()),
        }
    }

    /// Persist the settings blob
    pub fn save_settings(&self, settings: &Settings) -> StorageResult<()> {
        self.put(SETTINGS_KEY, &serde_json::to_vec(settings)?)
    }

    /// Load the settings blob; `None` means the store was never seeded
    pub fn load_settings(&self) -> StorageResult<Option<Settings>> {
        match self.get(SETTINGS_KEY)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}
