//! Database query operations

use super::Database;
use anyhow::Result;
use mcore::{BridgeRequest, Status};
use rusqlite::{params, types::Type, Connection, OptionalExtension, Params, Row};

/// Columns in the order read by [`from_row`]
const COLUMNS: &str = "id, source_tx_hash, depositor, requested_amount, quoted_output_amount,
    slippage_bps, status, source_chain_id, dest_chain_id, dest_tx_hash, created_at, completed_at";

/// Newest first, ties broken by insertion order
const NEWEST_FIRST: &str = "ORDER BY created_at DESC, id DESC";

impl Database {
    /// Get a bridge request by id
    pub fn get_request(&self, id: i64) -> Result<Option<BridgeRequest>> {
        let conn = self.conn()?;
        select_one(&conn, "WHERE id = ?1", params![id])
    }

    /// Get the earliest bridge request recorded with a source tx hash
    pub fn get_request_by_tx_hash(&self, tx_hash: &str) -> Result<Option<BridgeRequest>> {
        let conn = self.conn()?;
        select_one(
            &conn,
            "WHERE source_tx_hash = ?1 ORDER BY id ASC LIMIT 1",
            params![tx_hash],
        )
    }

    /// Get the bridge requests of a depositor, newest first
    pub fn get_requests_by_depositor(&self, depositor: &str) -> Result<Vec<BridgeRequest>> {
        let conn = self.conn()?;
        select_many(
            &conn,
            &format!("WHERE depositor = ?1 {NEWEST_FIRST}"),
            params![depositor.to_lowercase()],
        )
    }

    /// Get all pending bridge requests, newest first
    pub fn get_pending_requests(&self) -> Result<Vec<BridgeRequest>> {
        let conn = self.conn()?;
        select_many(
            &conn,
            &format!("WHERE status = ?1 {NEWEST_FIRST}"),
            params![Status::Pending.as_str()],
        )
    }
}

/// Select at most one bridge request
pub(super) fn select_one(
    conn: &Connection,
    clause: &str,
    params: impl Params,
) -> Result<Option<BridgeRequest>> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM bridge_requests {clause}"))?;
    let request = stmt.query_row(params, from_row).optional()?;
    Ok(request)
}

/// Select all matching bridge requests
fn select_many(conn: &Connection, clause: &str, params: impl Params) -> Result<Vec<BridgeRequest>> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM bridge_requests {clause}"))?;
    let requests = stmt
        .query_map(params, from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(requests)
}

/// Map a row selected with [`COLUMNS`]
fn from_row(row: &Row<'_>) -> rusqlite::Result<BridgeRequest> {
    let status: String = row.get(6)?;
    let status = status
        .parse::<Status>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?;

    Ok(BridgeRequest {
        id: row.get(0)?,
        source_tx_hash: row.get(1)?,
        depositor: row.get(2)?,
        requested_amount: row.get(3)?,
        quoted_output_amount: row.get(4)?,
        slippage_bps: row.get(5)?,
        status,
        source_chain_id: chain_id(row, 7)?,
        dest_chain_id: chain_id(row, 8)?,
        dest_tx_hash: row.get(9)?,
        created_at: row.get(10)?,
        completed_at: row.get(11)?,
    })
}

/// Chain ids are stored as SQLite integers
fn chain_id(row: &Row<'_>, idx: usize) -> rusqlite::Result<u64> {
    let id: i64 = row.get(idx)?;
    u64::try_from(id)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(e)))
}
