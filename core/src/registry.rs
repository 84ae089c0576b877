//! The registry of the bridged chains

use crate::quote::{ESTIMATED_TIME, FEE_PERCENT, SLIPPAGE_BPS};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Custodial deposit contract on the source chain
pub const BRIDGE_CONTRACT_ADDRESS: &str = "0xa4fac7a16d43f53adf0870001ccec603155eacdd";

/// Operator address paying out on the destination chain
pub const BRIDGE_OUT_ADDRESS: &str = "0x8c6cEf00ec5bB62Be675E472BA900BE24A2D32e8";

/// Minimum deposit offered by the UI, in ETH
pub const MIN_DEPOSIT: &str = "0";

/// Maximum deposit offered by the UI, in ETH
pub const MAX_DEPOSIT: &str = "100";

/// The bridged chains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Chain {
    /// Base mainnet
    Base,

    /// MegaETH mainnet
    MegaEth,
}

impl Chain {
    /// The chain deposits are made on
    pub const SOURCE: Chain = Chain::Base;

    /// The chain payouts are made on
    pub const TARGET: Chain = Chain::MegaEth;

    /// EIP-155 chain id
    pub const fn id(&self) -> u64 {
        match self {
            Chain::Base => 8453,
            Chain::MegaEth => 4326,
        }
    }
}

/// Public parameters of the bridge deployment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeInfo {
    pub source_chain_id: u64,
    pub dest_chain_id: u64,
    pub contract_address: String,
    pub payout_address: String,
    pub min_deposit: String,
    pub max_deposit: String,
    pub slippage_bps: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub fee_percent: Decimal,
    pub estimated_time: String,
}

impl BridgeInfo {
    /// Parameters of the reference deployment
    pub fn current() -> Self {
        Self {
            source_chain_id: Chain::SOURCE.id(),
            dest_chain_id: Chain::TARGET.id(),
            contract_address: BRIDGE_CONTRACT_ADDRESS.into(),
            payout_address: BRIDGE_OUT_ADDRESS.into(),
            min_deposit: MIN_DEPOSIT.into(),
            max_deposit: MAX_DEPOSIT.into(),
            slippage_bps: SLIPPAGE_BPS,
            fee_percent: FEE_PERCENT,
            estimated_time: ESTIMATED_TIME.into(),
        }
    }
}

#[test]
fn test_chain_ids() {
    assert_eq!(Chain::SOURCE.id(), 8453);
    assert_eq!(Chain::TARGET.id(), 4326);
}
