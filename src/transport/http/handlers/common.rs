use crate::domain::market::types::render_listing;
use crate::domain::market::{MarketError, Product};
use crate::transport::http::types::{RpcResponse, RpcStatus};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value as JsonValue;

pub fn market_error_status(err: &MarketError) -> StatusCode {
    match err {
        MarketError::AlreadyRegistered
        | MarketError::AlreadyRated(_)
        | MarketError::AlreadyWishlisted(_)
        | MarketError::InsufficientQuantity { .. } => StatusCode::CONFLICT,
        MarketError::SellerNotRegistered
        | MarketError::SellerNotFound
        | MarketError::ProductNotFound(_) => StatusCode::NOT_FOUND,
        MarketError::NotOwner(_) => StatusCode::FORBIDDEN,
        MarketError::InvalidPrice(_) => StatusCode::BAD_REQUEST,
    }
}

pub fn fail(status: StatusCode, code: &str, message: String) -> Response {
    (
        status,
        Json(RpcResponse {
            status: RpcStatus::Fail,
            message,
            code: Some(code.to_string()),
            data: None,
        }),
    )
        .into_response()
}

pub fn market_error_response(err: MarketError) -> Response {
    fail(market_error_status(&err), err.code(), err.to_string())
}

pub fn success(message: impl Into<String>, data: Option<JsonValue>) -> Response {
    (
        StatusCode::OK,
        Json(RpcResponse {
            status: RpcStatus::Success,
            message: message.into(),
            code: None,
            data,
        }),
    )
        .into_response()
}

/// Success payload for any call that returns listings: the structured items
/// plus the text block front ends print verbatim.
pub fn listing_data(items: &[Product]) -> JsonValue {
    serde_json::json!({
        "items": items,
        "output": render_listing(items),
    })
}

/// Unwraps an extracted JSON body or produces the 422 response for it.
pub fn parse_body<T>(
    request: Result<Json<T>, JsonRejection>,
    expected: &str,
) -> Result<T, Response> {
    match request {
        Ok(Json(v)) => Ok(v),
        Err(e) => Err(fail(
            StatusCode::UNPROCESSABLE_ENTITY,
            "INVALID_BODY",
            format!("Invalid JSON body: {} (expected: {})", e, expected),
        )),
    }
}
