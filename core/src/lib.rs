//! Core types for the MegaETH bridge

pub use {
    quote::{Quote, QuoteError},
    registry::{BridgeInfo, Chain},
    request::{BridgeRequest, NewBridgeRequest, Status, UnknownStatus},
};

pub mod quote;
pub mod registry;
mod request;
