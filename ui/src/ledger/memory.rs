//! In-memory ledger, for testing

use super::{Ledger, StatusChange};
use anyhow::Result;
use chrono::Utc;
use mcore::{BridgeRequest, NewBridgeRequest, Status};
use std::sync::{Mutex, MutexGuard};

/// [`Ledger`] implementation in memory
#[derive(Debug, Default)]
pub struct MemoryLedger {
    requests: Mutex<Vec<BridgeRequest>>,
}

impl MemoryLedger {
    fn requests(&self) -> Result<MutexGuard<'_, Vec<BridgeRequest>>> {
        self.requests
            .lock()
            .map_err(|_| anyhow::anyhow!("Memory ledger lock poisoned"))
    }

    fn select(&self, predicate: impl Fn(&BridgeRequest) -> bool) -> Result<Vec<BridgeRequest>> {
        let mut selected: Vec<_> = self
            .requests()?
            .iter()
            .filter(|request| predicate(*request))
            .cloned()
            .collect();
        selected.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(selected)
    }
}

impl Ledger for MemoryLedger {
    fn create(&self, request: NewBridgeRequest) -> Result<BridgeRequest> {
        let mut requests = self.requests()?;
        let id = requests.len() as i64 + 1;
        let request = BridgeRequest::from_new(id, request, Utc::now());
        requests.push(request.clone());
        Ok(request)
    }

    fn get(&self, id: i64) -> Result<Option<BridgeRequest>> {
        Ok(self.requests()?.iter().find(|r| r.id == id).cloned())
    }

    fn get_by_tx_hash(&self, tx_hash: &str) -> Result<Option<BridgeRequest>> {
        Ok(self
            .requests()?
            .iter()
            .find(|r| r.source_tx_hash.as_deref() == Some(tx_hash))
            .cloned())
    }

    fn get_by_depositor(&self, depositor: &str) -> Result<Vec<BridgeRequest>> {
        let depositor = depositor.to_lowercase();
        self.select(|r| r.depositor == depositor)
    }

    fn get_pending(&self) -> Result<Vec<BridgeRequest>> {
        self.select(|r| r.status == Status::Pending)
    }

    fn set_status(
        &self,
        id: i64,
        status: Status,
        dest_tx_hash: Option<&str>,
    ) -> Result<Option<StatusChange>> {
        let mut requests = self.requests()?;
        let Some(request) = requests.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        let previous = request.transition(status, dest_tx_hash, Utc::now());
        Ok(Some(StatusChange {
            previous,
            request: request.clone(),
        }))
    }
}
