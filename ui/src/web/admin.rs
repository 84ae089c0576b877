//! Operator endpoints
//!
//! Neither endpoint is authenticated, and neither checks that the request
//! is still pending: re-marking a closed request is accepted and logged.

use super::{not_found, parse_id, AppState};
use crate::AppError;
use axum::{
    body::Bytes,
    extract::{Path, State},
    response::Json,
};
use mcore::{BridgeRequest, Status};
use serde::Deserialize;

/// Optional body of POST /api/admin/fulfill/{id}
#[derive(Debug, Default, Deserialize)]
pub struct FulfillBody {
    #[serde(rename = "megaTxHash", alias = "destTxHash")]
    dest_tx_hash: Option<String>,
}

impl FulfillBody {
    /// Decode the body, an empty body carries no hash
    pub fn decode(body: &[u8]) -> Result<Self, AppError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        serde_json::from_slice(body)
            .map_err(|e| AppError::Validation(format!("Invalid request body: {e}")))
    }
}

/// Handler for POST /api/admin/fulfill/{id}
pub async fn fulfill(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<BridgeRequest>, AppError> {
    let id = parse_id(&id)?;
    let dest_tx_hash = FulfillBody::decode(&body)?
        .dest_tx_hash
        .filter(|hash| !hash.is_empty());
    mark(&state, id, Status::Completed, dest_tx_hash.as_deref())
}

/// Handler for POST /api/admin/reject/{id}
pub async fn reject(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BridgeRequest>, AppError> {
    let id = parse_id(&id)?;
    mark(&state, id, Status::Rejected, None)
}

fn mark(
    state: &AppState,
    id: i64,
    status: Status,
    dest_tx_hash: Option<&str>,
) -> Result<Json<BridgeRequest>, AppError> {
    let change = state
        .ledger
        .set_status(id, status, dest_tx_hash)?
        .ok_or_else(not_found)?;
    if change.previous.is_terminal() {
        tracing::warn!(
            "Bridge request {} was already {}, marked {}",
            id,
            change.previous,
            status
        );
    } else {
        tracing::info!("Bridge request {} marked {}", id, status);
    }
    Ok(Json(change.request))
}
