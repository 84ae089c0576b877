//! The bridge request record

use crate::{registry::Chain, Quote};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Status of a bridge request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Waiting for the operator
    Pending,

    /// Paid out on the destination chain
    Completed,

    /// Denied by the operator
    Rejected,
}

impl Status {
    /// The stored representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Completed => "completed",
            Status::Rejected => "rejected",
        }
    }

    /// Whether the operator has closed out the request
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Status::Pending)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for status strings outside of the known set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown bridge status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for Status {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Status::Pending),
            "completed" => Ok(Status::Completed),
            "rejected" => Ok(Status::Rejected),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// A recorded bridge request
///
/// Wire names follow the browser client, e.g. the destination
/// transaction is `megaTxHash`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeRequest {
    /// Sequential identifier
    pub id: i64,

    /// Deposit transaction on the source chain
    #[serde(rename = "txHash")]
    pub source_tx_hash: Option<String>,

    /// Lower-cased depositor address
    pub depositor: String,

    /// The amount requested by the user
    #[serde(rename = "amount")]
    pub requested_amount: String,

    /// The quoted payout, fixed at creation
    #[serde(rename = "quotedMegaAmount")]
    pub quoted_output_amount: String,

    /// Slippage policy at creation
    pub slippage_bps: u32,

    pub status: Status,

    pub source_chain_id: u64,

    pub dest_chain_id: u64,

    /// Payout transaction on the destination chain
    #[serde(rename = "megaTxHash")]
    pub dest_tx_hash: Option<String>,

    pub created_at: DateTime<Utc>,

    pub completed_at: Option<DateTime<Utc>>,
}

impl BridgeRequest {
    /// Assemble a stored request from its insert payload
    pub fn from_new(id: i64, new: NewBridgeRequest, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            source_tx_hash: new.source_tx_hash,
            depositor: new.depositor,
            requested_amount: new.requested_amount,
            quoted_output_amount: new.quoted_output_amount,
            slippage_bps: new.slippage_bps,
            status: Status::Pending,
            source_chain_id: new.source_chain_id,
            dest_chain_id: new.dest_chain_id,
            dest_tx_hash: None,
            created_at,
            completed_at: None,
        }
    }

    /// Apply an operator status change
    ///
    /// The destination hash is only replaced when one is given, and the
    /// completion time is stamped on every transition to `completed`.
    /// Returns the status the request had before.
    pub fn transition(
        &mut self,
        status: Status,
        dest_tx_hash: Option<&str>,
        now: DateTime<Utc>,
    ) -> Status {
        let previous = std::mem::replace(&mut self.status, status);
        if let Some(hash) = dest_tx_hash {
            self.dest_tx_hash = Some(hash.to_string());
        }
        if status == Status::Completed {
            self.completed_at = Some(now);
        }
        previous
    }
}

/// Insert payload for a bridge request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBridgeRequest {
    pub source_tx_hash: Option<String>,
    pub depositor: String,
    pub requested_amount: String,
    pub quoted_output_amount: String,
    pub slippage_bps: u32,
    pub source_chain_id: u64,
    pub dest_chain_id: u64,
}

impl NewBridgeRequest {
    /// Build the payload from a fresh quote
    pub fn new(depositor: &str, quote: &Quote, source_tx_hash: Option<String>) -> Self {
        Self {
            source_tx_hash,
            depositor: depositor.to_lowercase(),
            requested_amount: quote.input_amount.clone(),
            quoted_output_amount: quote.output_amount.clone(),
            slippage_bps: quote.slippage_bps,
            source_chain_id: Chain::SOURCE.id(),
            dest_chain_id: Chain::TARGET.id(),
        }
    }
}

#[test]
fn test_status_round_trip() {
    for status in [Status::Pending, Status::Completed, Status::Rejected] {
        assert_eq!(status.as_str().parse::<Status>(), Ok(status));
    }
    assert!("done".parse::<Status>().is_err());
    assert!(!Status::Pending.is_terminal());
    assert!(Status::Rejected.is_terminal());
}

#[test]
fn test_new_request_from_quote() {
    let quote = Quote::new("1.0").expect("valid amount");
    let new = NewBridgeRequest::new("0xAbCdEf", &quote, None);
    assert_eq!(new.depositor, "0xabcdef");
    assert_eq!(new.quoted_output_amount, "0.994000");
    assert_eq!(new.source_chain_id, 8453);
    assert_eq!(new.dest_chain_id, 4326);

    let request = BridgeRequest::from_new(1, new, Utc::now());
    assert_eq!(request.status, Status::Pending);
    assert!(request.completed_at.is_none());
    assert!(request.dest_tx_hash.is_none());
}

#[test]
fn test_transition() {
    let quote = Quote::new("2").expect("valid amount");
    let created = Utc::now();
    let mut request = BridgeRequest::from_new(7, NewBridgeRequest::new("0x1", &quote, None), created);

    let previous = request.transition(Status::Completed, Some("0xabc"), created);
    assert_eq!(previous, Status::Pending);
    assert_eq!(request.status, Status::Completed);
    assert_eq!(request.dest_tx_hash.as_deref(), Some("0xabc"));
    assert_eq!(request.completed_at, Some(created));

    let previous = request.transition(Status::Rejected, None, Utc::now());
    assert_eq!(previous, Status::Completed);
    assert_eq!(request.status, Status::Rejected);
    assert_eq!(request.dest_tx_hash.as_deref(), Some("0xabc"));
}
