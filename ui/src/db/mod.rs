//! Database module for storing bridge requests

mod migration;
mod query;
mod sql;

use crate::ledger::{Ledger, StatusChange};
use anyhow::Result;
use mcore::{BridgeRequest, NewBridgeRequest, Status};
use rusqlite::Connection;
use std::{
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

/// Thread-safe database connection wrapper
#[derive(Clone)]
pub struct Database {
    pub(crate) conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Create a new database connection
    pub fn new(db_path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                anyhow::anyhow!("Failed to create directory {}: {}", parent.display(), e)
            })?;
        }
        let conn = Connection::open(db_path).map_err(|e| {
            anyhow::anyhow!("Failed to open database at {}: {}", db_path.display(), e)
        })?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open a private in-memory database
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Lock the connection
    pub(crate) fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("Database connection lock poisoned"))
    }
}

impl Ledger for Database {
    fn create(&self, request: NewBridgeRequest) -> Result<BridgeRequest> {
        self.insert_request(request)
    }

    fn get(&self, id: i64) -> Result<Option<BridgeRequest>> {
        self.get_request(id)
    }

    fn get_by_tx_hash(&self, tx_hash: &str) -> Result<Option<BridgeRequest>> {
        self.get_request_by_tx_hash(tx_hash)
    }

    fn get_by_depositor(&self, depositor: &str) -> Result<Vec<BridgeRequest>> {
        self.get_requests_by_depositor(depositor)
    }

    fn get_pending(&self) -> Result<Vec<BridgeRequest>> {
        self.get_pending_requests()
    }

    fn set_status(
        &self,
        id: i64,
        status: Status,
        dest_tx_hash: Option<&str>,
    ) -> Result<Option<StatusChange>> {
        self.update_request_status(id, status, dest_tx_hash)
    }
}
