//! Route definitions and handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::error;

use crate::config::Config;
use crate::retrieval::CompanyInfoService;

use super::types::{ErrorResponse, HealthResponse, LookupRequest};

/// Shared state for all handlers.
pub struct AppState {
    pub service: CompanyInfoService,
}

/// Bind and serve the HTTP API until shutdown.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(AppState {
        service: CompanyInfoService::new(&config),
    });

    let app = router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/company", post(lookup_company))
        .route("/api/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// The single-page lookup UI.
async fn index() -> Html<&'static str> {
    Html(include_str!("../../assets/index.html"))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Look up a company by name.
///
/// Returns the parsed record as JSON (an empty object when nothing was
/// found), 400 for a blank name, and 502 with a generic message when the
/// agent invocation fails.
async fn lookup_company(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LookupRequest>,
) -> Response {
    let company_name = request.company_name.trim();

    if company_name.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Please enter a company name.".to_string(),
            }),
        )
            .into_response();
    }

    match state.service.retrieve(company_name).await {
        Ok(record) => Json(record).into_response(),
        Err(e) => {
            error!("Lookup failed for '{}': {}", company_name, e);
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: "Company lookup failed. Please try again later.".to_string(),
                }),
            )
                .into_response()
        }
    }
}
