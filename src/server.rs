use std::net::SocketAddr;

use axum::{
    extract::Path,
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Extension, Router,
};
use hyper::Server;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::error::ScraperError;
use crate::service::EventService;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub service: EventService,
    pub metrics: Option<PrometheusHandle>,
}

struct ApiError(ScraperError);

impl From<ScraperError> for ApiError {
    fn from(e: ScraperError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "ufc-events",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn list_events(Extension(state): Extension<AppState>) -> Result<Response, ApiError> {
    let events = state.service.get_all().await?;
    Ok(Json(events).into_response())
}

async fn get_event(Extension(state): Extension<AppState>, Path(id): Path<String>) -> Result<Response, ApiError> {
    match state.service.get_by_id(&id).await? {
        Some(event) => Ok(Json(event).into_response()),
        None => Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("Event '{}' not found", id) })),
        )
            .into_response()),
    }
}

async fn refresh_events(Extension(state): Extension<AppState>) -> Result<Response, ApiError> {
    let report = state.service.load_latest().await?;
    Ok(Json(json!({
        "message": "Events refreshed",
        "count": report.events.len(),
        "source": report.source,
    }))
    .into_response())
}

async fn render_metrics(Extension(state): Extension<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, "metrics recorder not installed").into_response(),
    }
}

/// All API routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/events", get(list_events))
        .route("/events/refresh", post(refresh_events))
        .route("/events/:id", get(get_event))
        .route("/metrics", get(render_metrics))
        .layer(Extension(state))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
}

/// Serve until Ctrl-C.
pub async fn start_server(state: AppState, port: u16) -> anyhow::Result<()> {
    let app = create_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("🚀 HTTP server running on http://localhost:{}", port);
    info!("💚 Health check: http://localhost:{}/health", port);

    Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;

    Ok(())
}
