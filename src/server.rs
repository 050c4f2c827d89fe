use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Extension, Router,
};
use hyper::Server;
use prost::Message;
use tracing::{error, info};

use crate::pipeline::Enricher;
use crate::publish::Publisher;
use crate::wire::WriteRequest;

pub struct AppState {
    pub enricher: Enricher,
    pub publisher: Box<dyn Publisher>,
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "metrics-enricher",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Remote-write receive endpoint: decode the protobuf body, run the
/// enrichment pipeline, hand the encoded records to the publisher. Answers
/// with the number of records published for the batch.
async fn receive(
    Extension(state): Extension<Arc<AppState>>,
    body: Bytes,
) -> (StatusCode, Json<serde_json::Value>) {
    let request = match WriteRequest::decode(body.as_ref()) {
        Ok(request) => request,
        Err(err) => {
            error!(error = %err, "couldn't decode remote-write body");
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({"error": "bad remote-write body"})),
            );
        }
    };

    let records = match state.enricher.serialize_batch(&request).await {
        Ok(records) => records,
        Err(err) => {
            error!(error = %err, "enrichment failed, dropping batch");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "enrichment failed"})),
            );
        }
    };

    let count = records.len();
    if let Err(err) = state.publisher.publish(&records).await {
        error!(error = %err, "publish failed");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": "publish failed"})),
        );
    }
    (StatusCode::OK, Json(serde_json::json!({"records": count})))
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/receive", post(receive))
        .route("/healthz", get(health))
        .layer(Extension(state))
}

pub async fn run(addr: SocketAddr, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = router(state);
    info!(%addr, "listening for remote-write batches");
    Server::bind(&addr).serve(app.into_make_service()).await?;
    Ok(())
}
