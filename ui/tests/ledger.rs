//! Ledger contract, run against every backend

use anyhow::Result;
use mcore::{NewBridgeRequest, Quote, Status};
use ui::{
    db::Database,
    ledger::{Ledger, MemoryLedger},
};

fn new_request(depositor: &str, amount: &str, tx_hash: Option<&str>) -> Result<NewBridgeRequest> {
    Ok(NewBridgeRequest::new(
        depositor,
        &Quote::new(amount)?,
        tx_hash.map(Into::into),
    ))
}

#[test]
fn test_memory_ledger() -> Result<()> {
    exercise(&MemoryLedger::default())
}

#[test]
fn test_sqlite_in_memory() -> Result<()> {
    let db = Database::in_memory()?;
    db.init()?;
    exercise(&db)
}

#[test]
fn test_sqlite_on_disk() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested/bridge.db");
    {
        let db = Database::new(&path)?;
        db.init()?;
        exercise(&db)?;
    }

    // Reopening keeps the rows and the schema init is idempotent
    let db = Database::new(&path)?;
    db.init()?;
    let request = db.get(1)?.ok_or(anyhow::anyhow!("request 1 missing"))?;
    assert_eq!(request.quoted_output_amount, "0.994000");
    Ok(())
}

fn exercise(ledger: &dyn Ledger) -> Result<()> {
    // create
    let first = ledger.create(new_request("0xAlice", "1.0", Some("0xdead"))?)?;
    assert_eq!(first.status, Status::Pending);
    assert_eq!(first.depositor, "0xalice");
    assert_eq!(first.requested_amount, "1.0");
    assert_eq!(first.quoted_output_amount, "0.994000");
    assert_eq!(first.slippage_bps, 50);
    assert_eq!(first.source_chain_id, 8453);
    assert_eq!(first.dest_chain_id, 4326);
    assert!(first.completed_at.is_none());
    assert!(first.dest_tx_hash.is_none());

    let second = ledger.create(new_request("0xBob", "2", None)?)?;
    let third = ledger.create(new_request("0xALICE", "3", Some("0xdead"))?)?;
    assert!(first.id < second.id && second.id < third.id);

    // get by id
    let stored = ledger.get(first.id)?.ok_or(anyhow::anyhow!("request missing"))?;
    assert_eq!(stored.depositor, first.depositor);
    assert_eq!(stored.source_tx_hash.as_deref(), Some("0xdead"));
    assert_eq!(stored.quoted_output_amount, first.quoted_output_amount);
    assert_eq!(stored.status, Status::Pending);
    assert_eq!(ledger.get(9999)?, None);

    // get by hash, duplicates are accepted and the first one wins
    assert_eq!(ledger.get_by_tx_hash("0xdead")?.map(|r| r.id), Some(first.id));
    assert_eq!(ledger.get_by_tx_hash("0xbeef")?, None);

    // get by depositor, newest first and case insensitive
    let alice = ledger.get_by_depositor("0xALIce")?;
    let ids: Vec<_> = alice.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![third.id, first.id]);
    assert!(alice.iter().all(|r| r.depositor == "0xalice"));
    assert!(ledger.get_by_depositor("0xcarol")?.is_empty());

    // fulfill
    let change = ledger
        .set_status(first.id, Status::Completed, Some("0xabc"))?
        .ok_or(anyhow::anyhow!("request missing"))?;
    assert_eq!(change.previous, Status::Pending);
    let fulfilled = change.request;
    assert_eq!(fulfilled.status, Status::Completed);
    assert_eq!(fulfilled.dest_tx_hash.as_deref(), Some("0xabc"));
    let completed_at = fulfilled.completed_at.ok_or(anyhow::anyhow!("no completion time"))?;
    assert!(completed_at >= fulfilled.created_at);
    assert_eq!(fulfilled.quoted_output_amount, first.quoted_output_amount);

    // reject keeps the destination hash
    let change = ledger
        .set_status(first.id, Status::Rejected, None)?
        .ok_or(anyhow::anyhow!("request missing"))?;
    assert_eq!(change.previous, Status::Completed);
    let rejected = change.request;
    assert_eq!(rejected.status, Status::Rejected);
    assert_eq!(rejected.dest_tx_hash.as_deref(), Some("0xabc"));

    let rejected = ledger
        .set_status(second.id, Status::Rejected, None)?
        .ok_or(anyhow::anyhow!("request missing"))?
        .request;
    assert!(rejected.completed_at.is_none());
    assert!(rejected.dest_tx_hash.is_none());

    // pending, newest first
    let pending: Vec<_> = ledger.get_pending()?.into_iter().map(|r| r.id).collect();
    assert_eq!(pending, vec![third.id]);

    // unknown ids
    assert_eq!(ledger.set_status(9999, Status::Completed, Some("0x1"))?, None);
    assert_eq!(ledger.set_status(9999, Status::Rejected, None)?, None);
    Ok(())
}
