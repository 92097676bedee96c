// src/bin/api_server.rs

use marketplace_registry::infra::{config, telemetry};
use marketplace_registry::transport;
use marketplace_registry::MarketplaceService;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    telemetry::init_tracing();

    // --- Service Initialization ---
    info!("Initializing MarketplaceService (in-memory registry, starts empty)...");
    let service = Arc::new(MarketplaceService::from_env()?);
    let app_state = transport::http::AppState::new(service);

    // --- API Server Initialization ---
    let bind_addr = config::bind_addr();
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    let app = transport::http::create_router(app_state)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()),
        )
        .layer(cors);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Marketplace registry listening on http://{}", bind_addr);
    info!("Swagger UI available at http://{}/swagger-ui", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received (Ctrl+C), registry state is discarded");
        })
        .await?;

    info!("Graceful shutdown complete.");
    Ok(())
}
