//! Bridge request ledger
//!
//! Handlers only see the [`Ledger`] trait, the SQLite [`Database`] backs it
//! in production and [`MemoryLedger`] in tests.
//!
//! [`Database`]: crate::db::Database

pub use memory::MemoryLedger;

mod memory;

use anyhow::Result;
use mcore::{BridgeRequest, NewBridgeRequest, Status};

/// Storage interface for bridge requests
///
/// Every operation is a single-row read or write. Lists are returned
/// newest first (`created_at` descending, ties broken by `id`).
pub trait Ledger: Send + Sync {
    /// Record a new pending request
    fn create(&self, request: NewBridgeRequest) -> Result<BridgeRequest>;

    /// Get a request by id
    fn get(&self, id: i64) -> Result<Option<BridgeRequest>>;

    /// Get the first request recorded with the source transaction hash
    fn get_by_tx_hash(&self, tx_hash: &str) -> Result<Option<BridgeRequest>>;

    /// List the requests of a depositor, matched lower-cased
    fn get_by_depositor(&self, depositor: &str) -> Result<Vec<BridgeRequest>>;

    /// List all pending requests
    fn get_pending(&self) -> Result<Vec<BridgeRequest>>;

    /// Set the status of a request
    ///
    /// Returns `None` if the id is unknown.
    fn set_status(
        &self,
        id: i64,
        status: Status,
        dest_tx_hash: Option<&str>,
    ) -> Result<Option<StatusChange>>;
}

/// Outcome of [`Ledger::set_status`]
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    /// Status before the update
    pub previous: Status,

    /// The request after the update
    pub request: BridgeRequest,
}
