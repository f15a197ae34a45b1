//! HTTP API server.
//!
//! Exposes the answer-resolution pipeline and the static catalog via a JSON
//! HTTP API for the demo front end.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/api/ask` | Resolve a question through the LLM answer service |
//! | `GET`  | `/api/catalog` | Full dump of the static catalog |
//! | `POST` | `/api/sync/justice` | Placeholder sync acknowledgement |
//! | `POST` | `/api/sync/csu` | Placeholder sync acknowledgement |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error contract
//!
//! Error responses carry a flat body — `{ "error": "<message>" }` — and never
//! expose provider payloads or configuration details. Status mapping:
//! 400 invalid question, 500 missing credential or unexpected failure,
//! 502 upstream model failure.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so the static demo shell
//! can be served from anywhere.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::llm::{self, AskError, ResolvedAnswer};

/// Shared application state passed to all route handlers via Axum's `State`
/// extractor. Both fields are read-only for the process lifetime.
#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
    catalog: Arc<Catalog>,
}

/// Starts the HTTP server.
///
/// Binds to the address configured in `[server].bind` and serves requests
/// until the process is terminated. The catalog must already be loaded; it
/// is shared read-only across all in-flight requests.
pub async fn run_server(config: &Config, catalog: Catalog) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();

    let state = AppState {
        config: Arc::new(config.clone()),
        catalog: Arc::new(catalog),
    };

    let app = build_router(state);

    info!("statikum server listening on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Assembles the router with all route handlers and the CORS layer.
fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/ask", post(handle_ask))
        .route("/api/catalog", get(handle_catalog))
        .route("/api/sync/justice", post(handle_sync_justice))
        .route("/api/sync/csu", post(handle_sync_csu))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(state)
}

// ============ Error response ============

/// Flat JSON error body: `{ "error": "<message>" }`.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        message: message.into(),
    }
}

/// Maps service-level errors to boundary responses. Validation faults the
/// client; configuration problems surface as a generic misconfiguration
/// message (never the credential detail); upstream failures map to 502.
fn map_ask_error(err: AskError) -> AppError {
    match err {
        AskError::Validation(message) => bad_request(message),
        AskError::Configuration(_) => AppError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Server misconfiguration".to_string(),
        },
        AskError::Upstream(_) => AppError {
            status: StatusCode::BAD_GATEWAY,
            message: "Failed to get response from the model provider".to_string(),
        },
    }
}

// ============ POST /api/ask ============

/// Handler for `POST /api/ask`.
///
/// Accepts `{ "question": <string> }` and resolves it through the LLM answer
/// service. A syntactically invalid body and a missing, blank, or non-string
/// `question` are all rejected with 400 before any outbound call is made.
async fn handle_ask(
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<ResolvedAnswer>, AppError> {
    let Json(body) = body.map_err(|rejection| bad_request(rejection.body_text()))?;

    let question = body
        .get("question")
        .and_then(|q| q.as_str())
        .ok_or_else(|| bad_request("Missing question"))?;

    let resolved = llm::resolve_question(&state.config.llm, &state.catalog, question)
        .await
        .map_err(map_ask_error)?;

    Ok(Json(resolved))
}

// ============ GET /api/catalog ============

/// Handler for `GET /api/catalog`.
///
/// Returns the full static catalog — no pagination, no filtering.
async fn handle_catalog(State(state): State<AppState>) -> Response {
    Json(state.catalog.snapshot()).into_response()
}

// ============ POST /api/sync/* ============

/// Static acknowledgement body for the placeholder sync endpoints.
#[derive(Serialize)]
struct SyncResponse {
    status: &'static str,
    message: &'static str,
}

/// Placeholder sync endpoint for Justice registry data. Performs no work.
async fn handle_sync_justice() -> Json<SyncResponse> {
    Json(SyncResponse {
        status: "ok",
        message: "Synchronizace dat z Justice je v tomto prototypu pouze simulovaná. \
                  Reálné stahování a zpracování dokumentů bude součástí plné verze.",
    })
}

/// Placeholder sync endpoint for ČSU time-series data. Performs no work.
async fn handle_sync_csu() -> Json<SyncResponse> {
    Json(SyncResponse {
        status: "ok",
        message: "Synchronizace dat z ČSU je v tomto prototypu pouze simulovaná. \
                  Reálné stahování a zpracování časových řad bude součástí plné verze.",
    })
}

// ============ GET /health ============

/// JSON response body for `GET /health`.
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Handler for `GET /health`.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
