use std::any::Any;
use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::http::codec::{decode_body, encode_response, request_encoding, response_encoding};
use crate::http::errors::{panic_response, render_error};
use crate::model::{DocumentId, Metadata};
use crate::service::Service;

#[derive(Clone)]
pub struct AppState {
    pub service: Service,
}

/// Builds the full router for `/api/v1`, wrapped with request tracing and
/// panic recovery. The core service is the only thing handlers touch;
/// nothing here leaks back into the library.
pub fn router(service: Service) -> Router {
    let state = AppState { service };

    let api = Router::new()
        .route("/metadata", get(get_all_metadata).post(insert_metadata))
        .route("/metadata/_search", get(search_metadata))
        .route("/metadata/_health", get(health))
        .route("/metadata/{id}", get(get_metadata))
        .route("/stats", get(stats))
        .with_state(state);

    Router::new().nest("/api/v1", api).layer(
        tower::ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CatchPanicLayer::custom(handle_panic)),
    )
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    tracing::error!(panic = %message, "request handler panicked");
    panic_response()
}

async fn insert_metadata(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let encoding = match request_encoding(&headers) {
        Ok(encoding) => encoding,
        Err(err) => return render_error(&headers, err),
    };
    let metadata: Metadata = match decode_body(encoding, &body) {
        Ok(metadata) => metadata,
        Err(err) => return render_error(&headers, err),
    };
    match state.service.insert(metadata) {
        Ok(id) => {
            let location = format!("/api/v1/metadata/{id}");
            (StatusCode::CREATED, [(header::LOCATION, location)]).into_response()
        }
        Err(err) => render_error(&headers, err),
    }
}

async fn get_all_metadata(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let documents = state.service.get_all();
    encode_response(response_encoding(&headers), StatusCode::OK, &documents)
}

async fn search_metadata(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    match state.service.search(&params, &CancellationToken::new()) {
        Ok(documents) => encode_response(response_encoding(&headers), StatusCode::OK, &documents),
        Err(err) => render_error(&headers, err),
    }
}

#[derive(Serialize)]
struct HealthBody {
    version: String,
    health: String,
}

async fn health(State(state): State<AppState>) -> Json<HealthBody> {
    let healthy = state.service.health();
    Json(HealthBody {
        version: state.service.version().to_string(),
        health: if healthy { "green".to_string() } else { "red".to_string() },
    })
}

async fn get_metadata(State(state): State<AppState>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    let id: DocumentId = match id.parse() {
        Ok(id) => id,
        Err(_) => return render_error(&headers, crate::error::ServiceError::Decode),
    };
    match state.service.get(id) {
        Ok(document) => encode_response(response_encoding(&headers), StatusCode::OK, &document),
        Err(err) => render_error(&headers, err),
    }
}

#[derive(Serialize)]
struct StatsBody {
    documents: u64,
}

async fn stats(State(state): State<AppState>) -> Json<StatsBody> {
    Json(StatsBody {
        documents: state.service.size(),
    })
}
