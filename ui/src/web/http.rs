//! Public HTTP API handlers

use super::{not_found, parse_id, AppState, Payload};
use crate::AppError;
use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use mcore::{quote::ESTIMATED_TIME, BridgeInfo, BridgeRequest, NewBridgeRequest, Quote, QuoteError};
use serde::{Deserialize, Serialize};

/// Message returned once a bridge request is recorded
pub const BRIDGE_MESSAGE: &str =
    "Bridge initiated! Please wait approximately 30 minutes for completion.";

/// Query parameters for /api/quote
#[derive(Deserialize)]
pub struct QuoteQuery {
    amount: Option<String>,
}

/// Handler for GET /api/quote?amount={amount}
pub async fn get_quote(Query(query): Query<QuoteQuery>) -> Result<Json<Quote>, AppError> {
    let amount = query.amount.ok_or(QuoteError::Missing)?;
    Ok(Json(Quote::new(&amount)?))
}

/// Handler for GET /api/config
pub async fn get_config() -> Json<BridgeInfo> {
    Json(BridgeInfo::current())
}

/// Body of POST /api/bridge as sent by the client
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeBody {
    depositor: Option<String>,
    amount: Option<String>,
    tx_hash: Option<String>,
}

/// A validated bridge submission
#[derive(Debug)]
pub struct BridgeSubmission {
    pub depositor: String,
    pub amount: String,
    pub tx_hash: Option<String>,
}

impl TryFrom<BridgeBody> for BridgeSubmission {
    type Error = AppError;

    fn try_from(body: BridgeBody) -> Result<Self, Self::Error> {
        let non_empty = |field: Option<String>| field.filter(|v| !v.trim().is_empty());
        let (Some(depositor), Some(amount)) = (non_empty(body.depositor), non_empty(body.amount))
        else {
            return Err(AppError::Validation(
                "Depositor and amount are required".to_string(),
            ));
        };

        Ok(Self {
            depositor: depositor.trim().to_string(),
            amount,
            tx_hash: non_empty(body.tx_hash),
        })
    }
}

/// Response of POST /api/bridge
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeReceipt {
    #[serde(flatten)]
    pub request: BridgeRequest,
    pub estimated_time: String,
    pub message: String,
}

/// Handler for POST /api/bridge
pub async fn create_bridge(
    State(state): State<AppState>,
    Payload(body): Payload<BridgeBody>,
) -> Result<Json<BridgeReceipt>, AppError> {
    let submission = BridgeSubmission::try_from(body)?;
    let quote = Quote::new(&submission.amount)?;
    let request = state.ledger.create(NewBridgeRequest::new(
        &submission.depositor,
        &quote,
        submission.tx_hash,
    ))?;

    tracing::info!(
        "Bridge request {} recorded: {} ETH from {}, quoted {}",
        request.id,
        request.requested_amount,
        request.depositor,
        request.quoted_output_amount
    );

    Ok(Json(BridgeReceipt {
        request,
        estimated_time: ESTIMATED_TIME.to_string(),
        message: BRIDGE_MESSAGE.to_string(),
    }))
}

/// Handler for GET /api/bridge/{id}
pub async fn get_bridge(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BridgeRequest>, AppError> {
    let id = parse_id(&id)?;
    state.ledger.get(id)?.map(Json).ok_or_else(not_found)
}

/// Handler for GET /api/bridge/tx/{hash}
pub async fn get_bridge_by_tx(
    State(state): State<AppState>,
    Path(hash): Path<String>,
) -> Result<Json<BridgeRequest>, AppError> {
    tracing::trace!("Querying bridge request by tx hash: {}", hash);
    state
        .ledger
        .get_by_tx_hash(&hash)?
        .map(Json)
        .ok_or_else(not_found)
}

/// Handler for GET /api/transactions/{address}
pub async fn get_by_depositor(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<Vec<BridgeRequest>>, AppError> {
    let requests = state.ledger.get_by_depositor(&address.to_lowercase())?;
    Ok(Json(requests))
}

/// Handler for GET /api/transactions
pub async fn get_pending(
    State(state): State<AppState>,
) -> Result<Json<Vec<BridgeRequest>>, AppError> {
    Ok(Json(state.ledger.get_pending()?))
}
