//! REST API Server for the wellness navigator
//!
//! GET  /health  liveness
//! POST /coach   one pass of the coaching workflow
//! POST /sync    forward a completed session to the sync webhook

use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, info_span, warn, Instrument};

use crate::config::AppConfig;
use crate::error::CoachError;
use crate::models::{CoachRequest, CoachResponse, SyncPayload, SyncRequest};
use crate::notifier::{SyncNotifier, SyncOutcome};
use crate::workflow::CoachWorkflow;

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub workflow: Arc<CoachWorkflow>,
    pub notifier: Option<Arc<dyn SyncNotifier>>,
}

impl ApiState {
    pub fn new(workflow: CoachWorkflow, notifier: Option<Arc<dyn SyncNotifier>>) -> Self {
        Self {
            workflow: Arc::new(workflow),
            notifier,
        }
    }
}

/// =============================
/// Error Responses
/// =============================

impl IntoResponse for CoachError {
    fn into_response(self) -> Response {
        let status = if self.is_delivery_failure() {
            StatusCode::BAD_GATEWAY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = Json(json!({
            "error": self.to_string(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }));

        (status, body).into_response()
    }
}

/// =============================
/// Health Endpoint
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// =============================
/// Coaching Endpoint
/// =============================

async fn coach(
    State(state): State<ApiState>,
    Json(req): Json<CoachRequest>,
) -> Json<CoachResponse> {
    let request_id = uuid::Uuid::new_v4();
    let span = info_span!("coach", %request_id, user_name = %req.user_name);

    async move {
        let response = state.workflow.respond(req.into()).await;
        info!(
            focus_area = %response.focus_area,
            ready_to_sync = response.ready_to_sync,
            flagged = response.safety_flag.is_some(),
            "Coaching response ready"
        );
        Json(response)
    }
    .instrument(span)
    .await
}

/// =============================
/// Sync Endpoint
/// =============================

async fn sync(
    State(state): State<ApiState>,
    Json(req): Json<SyncRequest>,
) -> Result<Json<serde_json::Value>, CoachError> {
    let payload = SyncPayload::from_request(req, chrono::Utc::now());

    let Some(notifier) = &state.notifier else {
        info!(user_name = %payload.user_name, "No webhook configured, sync skipped");
        return Ok(Json(json!({
            "status": "skipped",
            "timestamp": payload.timestamp,
        })));
    };

    match notifier.notify(&payload).await {
        Ok(SyncOutcome::Delivered { remote_status }) => Ok(Json(json!({
            "status": "delivered",
            "timestamp": payload.timestamp,
            "remote_status": remote_status,
        }))),
        Err(e) => {
            warn!(user_name = %payload.user_name, "Sync delivery failed: {}", e);
            Err(e)
        }
    }
}

/// =============================
/// Router
/// =============================

pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            // AllowOrigin::list panics on a wildcard entry.
            Ok(value) if value == "*" => {
                warn!("Ignoring wildcard CORS origin; credentials require explicit origins");
                None
            }
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    // Credentials rule out wildcards, so methods and headers mirror the request.
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

pub fn create_router(state: ApiState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/coach", post(coach))
        .route("/sync", post(sync))
        .with_state(state)
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(
    state: ApiState,
    config: &AppConfig,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let router = create_router(state, &config.allowed_origins);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!("API Server listening on http://0.0.0.0:{}", config.port);
    info!("Local: http://127.0.0.1:{}", config.port);

    axum::serve(listener, router).await?;

    Ok(())
}
