//! Web service module
//!
//! Public endpoints live in [`http`], operator endpoints in [`admin`].
//! All errors are returned as `{ "error": <message> }`.

pub mod admin;
pub mod http;

use crate::{ledger::Ledger, AppError};
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    routing::{get, post},
    Json, Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<dyn Ledger>,
}

impl AppState {
    /// Create the state over a ledger backend
    pub fn new(ledger: impl Ledger + 'static) -> Self {
        Self {
            ledger: Arc::new(ledger),
        }
    }
}

/// Build the API router
pub fn router(state: AppState) -> Router {
    // Configure CORS to allow requests from any origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/config", get(http::get_config))
        .route("/api/quote", get(http::get_quote))
        .route("/api/bridge", post(http::create_bridge))
        .route("/api/bridge/{id}", get(http::get_bridge))
        .route("/api/bridge/tx/{hash}", get(http::get_bridge_by_tx))
        .route("/api/transactions", get(http::get_pending))
        .route("/api/transactions/{address}", get(http::get_by_depositor))
        .route("/api/admin/fulfill/{id}", post(admin::fulfill))
        .route("/api/admin/reject/{id}", post(admin::reject))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the web service
pub async fn serve(listen_addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let app = router(state);

    tracing::info!("Starting web server on {}", listen_addr);
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// JSON body decoded at the boundary
///
/// Unlike [`Json`], a malformed body is rejected with a JSON
/// [`AppError::Validation`].
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejection_error(rejection)),
        }
    }
}

fn rejection_error(rejection: JsonRejection) -> AppError {
    AppError::Validation(format!("Invalid request body: {}", rejection.body_text()))
}

/// Parse a bridge request id from the path
pub fn parse_id(id: &str) -> Result<i64, AppError> {
    id.trim()
        .parse::<i64>()
        .map_err(|_| AppError::Validation(format!("Invalid transaction id: {id}")))
}

/// Error for ids the ledger does not know
pub fn not_found() -> AppError {
    AppError::NotFound("Transaction not found".to_string())
}
