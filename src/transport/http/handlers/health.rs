use crate::transport::http::handlers::common::success;
use crate::transport::http::types::{AppState, RpcResponse};
use axum::extract::State;
use axum::response::Response;
use chrono::Utc;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up; data carries registry counters", body = RpcResponse)
    )
)]
pub async fn healthcheck_handler(State(state): State<AppState>) -> Response {
    let stats = state.service.stats();
    let uptime = Utc::now() - state.started_at;
    success(
        "ok",
        Some(serde_json::json!({
            "status": "ok",
            "products": stats.products,
            "sellers": stats.sellers,
            "buyers": stats.buyers,
            "next_product_id": stats.next_id,
            "notifications": state.service.notifications_enabled(),
            "started_at": state.started_at.to_rfc3339(),
            "uptime_secs": uptime.num_seconds(),
        })),
    )
}
