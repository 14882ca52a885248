use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use insta_insight::config::{AnalyzerConfig, ServiceCatalog};
use insta_insight::{analyze_value, AnalysisReport};

#[derive(Clone)]
struct AppState {
    catalog: Arc<ServiceCatalog>,
}

pub async fn serve(args: crate::ServeArgs) -> Result<(), String> {
    let config = AnalyzerConfig::load(args.config)?;
    let state = AppState {
        catalog: Arc::new(config.services),
    };

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/analyze", post(analyze_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;

    tracing::info!(%addr, "profile analyzer listening");

    axum::serve(
        tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|err| format!("failed to bind server: {}", err))?,
        app,
    )
    .await
    .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn analyze_handler(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<AnalysisReport>, (StatusCode, Json<Value>)> {
    tracing::debug!("received analyze request");
    match analyze_value(payload, &state.catalog, Local::now().naive_local()) {
        Ok(report) => Ok(Json(report)),
        Err(err) => {
            tracing::warn!(error = %err, "rejected analyze request");
            Err((
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": err.to_string() })),
            ))
        }
    }
}
