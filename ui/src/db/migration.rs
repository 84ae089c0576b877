//! Database schema initialization and migrations

use super::Database;
use anyhow::Result;

impl Database {
    /// Initialize the database schema
    pub fn init(&self) -> Result<()> {
        let conn = self.conn()?;

        // Create bridge requests table
        conn.execute(
            "CREATE TABLE IF NOT EXISTS bridge_requests (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                source_tx_hash TEXT,
                depositor TEXT NOT NULL,
                requested_amount TEXT NOT NULL,
                quoted_output_amount TEXT NOT NULL,
                slippage_bps INTEGER NOT NULL DEFAULT 50,
                status TEXT NOT NULL DEFAULT 'pending',
                source_chain_id INTEGER NOT NULL DEFAULT 8453,
                dest_chain_id INTEGER NOT NULL DEFAULT 4326,
                dest_tx_hash TEXT,
                created_at TEXT NOT NULL,
                completed_at TEXT
            )",
            [],
        )?;

        // Create indexes for the lookups
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_bridge_requests_depositor
             ON bridge_requests(depositor, created_at)",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_bridge_requests_status
             ON bridge_requests(status, created_at)",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_bridge_requests_tx_hash
             ON bridge_requests(source_tx_hash)",
            [],
        )?;

        Ok(())
    }
}
