pub mod handlers;
mod types;

pub use types::*;

use crate::{Result, config::Config, upstream::HuggingFaceClient};
use axum::{Router, routing::post};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

pub const TEXT_ROUTE: &str = "/api/hf";
pub const IMAGE_ROUTE: &str = "/api/hf-image";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(TEXT_ROUTE, post(handlers::text_completion))
        .route(IMAGE_ROUTE, post(handlers::image_completion))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let upstream = HuggingFaceClient::new(config.upstream.clone())?;

    if !upstream.has_api_key() {
        warn!("No upstream API key configured (set HF_TOKEN); upstream calls will be rejected");
    }

    info!(
        chat_url = %upstream.chat_url(),
        image_url = %upstream.image_url(),
        text_model = %config.upstream.text_model,
        "Upstream configured"
    );

    let app = router(AppState {
        upstream: Arc::new(upstream),
    });

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
