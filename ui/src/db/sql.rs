//! SQL write operations

use super::{query::select_one, Database};
use crate::ledger::StatusChange;
use anyhow::Result;
use chrono::Utc;
use mcore::{BridgeRequest, NewBridgeRequest, Status};
use rusqlite::{params, OptionalExtension};

impl Database {
    /// Insert a new pending bridge request
    pub fn insert_request(&self, request: NewBridgeRequest) -> Result<BridgeRequest> {
        let conn = self.conn()?;
        let created_at = Utc::now();

        conn.execute(
            "INSERT INTO bridge_requests
             (source_tx_hash, depositor, requested_amount, quoted_output_amount,
              slippage_bps, status, source_chain_id, dest_chain_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                request.source_tx_hash,
                request.depositor,
                request.requested_amount,
                request.quoted_output_amount,
                request.slippage_bps,
                Status::Pending.as_str(),
                i64::try_from(request.source_chain_id)?,
                i64::try_from(request.dest_chain_id)?,
                created_at,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Ok(BridgeRequest::from_new(id, request, created_at))
    }

    /// Update the status of a bridge request
    ///
    /// The destination hash is kept when none is given, the completion
    /// time is stamped on every transition to `completed`.
    pub fn update_request_status(
        &self,
        id: i64,
        status: Status,
        dest_tx_hash: Option<&str>,
    ) -> Result<Option<StatusChange>> {
        let conn = self.conn()?;
        let previous: Option<String> = conn
            .query_row(
                "SELECT status FROM bridge_requests WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        let Some(previous) = previous else {
            return Ok(None);
        };
        let previous = previous.parse::<Status>()?;

        conn.execute(
            "UPDATE bridge_requests SET
                status = ?2,
                dest_tx_hash = COALESCE(?3, dest_tx_hash),
                completed_at = CASE WHEN ?2 = 'completed' THEN ?4 ELSE completed_at END
             WHERE id = ?1",
            params![id, status.as_str(), dest_tx_hash, Utc::now()],
        )?;

        let request = select_one(&conn, "WHERE id = ?1", params![id])?
            .ok_or_else(|| anyhow::anyhow!("Bridge request {id} vanished during update"))?;
        Ok(Some(StatusChange { previous, request }))
    }
}
