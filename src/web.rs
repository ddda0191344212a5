use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::{self, AppState};

/// Assemble the full application router
pub fn app(state: AppState) -> Router {
    // The chat widget is served from a different origin during development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api::router(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(state: AppState, port: u16) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("NomadAI listening at http://localhost:{}", port);
    axum::serve(listener, app(state)).await?;
    Ok(())
}

async fn health() -> &'static str {
    "OK"
}
