//! HTTP request layer. Each handler parses its input, calls one store
//! operation and serializes the result; every rejected extraction is
//! answered with an explicit client error.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::dto::{StatusResponse, SumResponse, Transaction, TransactionBody};
use crate::{Error, SharedEngine};

/// Builds the service router over the shared engine.
pub fn router(engine: SharedEngine) -> Router {
    Router::new()
        .route(
            "/transactionservice/transaction/:transaction_id",
            put(put_transaction).post(put_transaction),
        )
        .route(
            "/transactionservice/retrieveTransaction/:transaction_id",
            get(get_transaction),
        )
        .route("/transactionservice/types/:type", get(list_by_type))
        .route("/transactionservice/sum/:transaction_id", get(sum_subtree))
        .layer(TraceLayer::new_for_http())
        .with_state(engine)
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            Error::TransactionNotFound(_) => (StatusCode::NOT_FOUND, "TRANSACTION_NOT_FOUND"),
            Error::MalformedInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            Error::CycleDetected(_) => (StatusCode::UNPROCESSABLE_ENTITY, "CYCLE_DETECTED"),
            Error::DepthExceeded { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "DEPTH_EXCEEDED"),
            Error::NonFiniteSum(_) => (StatusCode::UNPROCESSABLE_ENTITY, "NON_FINITE_SUM"),
        };
        if status != StatusCode::NOT_FOUND {
            warn!("Request failed: {}", self);
        }
        let body = json!({
            "error": self.to_string(),
            "code": code,
        });
        (status, Json(body)).into_response()
    }
}

fn parse_path<T>(path: Result<Path<T>, PathRejection>) -> Result<T, Error> {
    path.map(|Path(value)| value)
        .map_err(|rejection| Error::MalformedInput(rejection.body_text()))
}

/// PUT or POST /transactionservice/transaction/:transaction_id
pub async fn put_transaction(
    State(engine): State<SharedEngine>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<TransactionBody>, JsonRejection>,
) -> Result<Json<StatusResponse>, Error> {
    let id = parse_path(path)?;
    let Json(body) = body.map_err(|rejection| Error::MalformedInput(rejection.body_text()))?;
    info!("PUT /transactionservice/transaction/{} - body: {:?}", id, body);

    engine.upsert(body.into_transaction(id)).await;
    Ok(Json(StatusResponse::ok()))
}

/// GET /transactionservice/retrieveTransaction/:transaction_id
pub async fn get_transaction(
    State(engine): State<SharedEngine>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Transaction>, Error> {
    let id = parse_path(path)?;
    info!("GET /transactionservice/retrieveTransaction/{}", id);

    engine.get(id).await.map(Json)
}

/// GET /transactionservice/types/:type
pub async fn list_by_type(
    State(engine): State<SharedEngine>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<i64>>, Error> {
    let tx_type = parse_path(path)?;
    info!("GET /transactionservice/types/{}", tx_type);

    Ok(Json(engine.list_by_type(&tx_type).await))
}

/// GET /transactionservice/sum/:transaction_id
pub async fn sum_subtree(
    State(engine): State<SharedEngine>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<SumResponse>, Error> {
    let id = parse_path(path)?;
    info!("GET /transactionservice/sum/{}", id);

    let sum = engine.sum_subtree(id).await?;
    Ok(Json(SumResponse { sum }))
}
