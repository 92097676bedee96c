use crate::domain::market::{BuyerId, CategoryFilter};
use crate::transport::http::handlers::common::{
    listing_data, market_error_response, parse_body, success,
};
use crate::transport::http::types::{
    AppState, BuyItemRequest, DisplayWishlistRequest, GetItemRequest, RateItemRequest,
    RpcResponse, SearchItemRequest, WishlistRequest,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;

#[utoipa::path(
    post,
    path = "/rpc/search-item",
    request_body = SearchItemRequest,
    responses(
        (status = 200, description = "Matching listings (data.items, data.output)", body = RpcResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = RpcResponse)
    )
)]
pub async fn search_item_handler(
    State(state): State<AppState>,
    request: Result<Json<SearchItemRequest>, JsonRejection>,
) -> Response {
    let request = match parse_body(request, "{\"name\", \"category\"}") {
        Ok(r) => r,
        Err(resp) => return resp,
    };
    let filter = CategoryFilter::from_token(&request.category);
    let items = state.service.search_item(&request.name, filter);
    success(
        format!("{} item(s) found", items.len()),
        Some(listing_data(&items)),
    )
}

#[utoipa::path(
    post,
    path = "/rpc/rate-item",
    request_body = RateItemRequest,
    responses(
        (status = 200, description = "Rating recorded; data.rating holds the new mean", body = RpcResponse),
        (status = 404, description = "Product not found", body = RpcResponse),
        (status = 409, description = "Already rated by this buyer", body = RpcResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = RpcResponse)
    )
)]
pub async fn rate_item_handler(
    State(state): State<AppState>,
    request: Result<Json<RateItemRequest>, JsonRejection>,
) -> Response {
    let request = match parse_body(request, "{\"buyer_address\", \"product_id\", \"rating\"}") {
        Ok(r) => r,
        Err(resp) => return resp,
    };
    let buyer = BuyerId::new(request.buyer_address);
    match state
        .service
        .rate_item(&buyer, request.product_id, request.rating)
    {
        Ok(rating) => success(
            "Rated product successfully",
            Some(serde_json::json!({ "rating": rating })),
        ),
        Err(e) => market_error_response(e),
    }
}

#[utoipa::path(
    post,
    path = "/rpc/wishlist-item",
    request_body = WishlistRequest,
    responses(
        (status = 200, description = "Added to wishlist", body = RpcResponse),
        (status = 404, description = "Product not found", body = RpcResponse),
        (status = 409, description = "Already in wishlist", body = RpcResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = RpcResponse)
    )
)]
pub async fn wishlist_item_handler(
    State(state): State<AppState>,
    request: Result<Json<WishlistRequest>, JsonRejection>,
) -> Response {
    let request = match parse_body(request, "{\"buyer_address\", \"product_id\"}") {
        Ok(r) => r,
        Err(resp) => return resp,
    };
    let buyer = BuyerId::new(request.buyer_address);
    match state.service.wishlist_item(&buyer, request.product_id) {
        Ok(()) => success("Added product to your wishlist", None),
        Err(e) => market_error_response(e),
    }
}

#[utoipa::path(
    post,
    path = "/rpc/buy-item",
    request_body = BuyItemRequest,
    responses(
        (status = 200, description = "Purchase done; data.remaining holds the stock left", body = RpcResponse),
        (status = 404, description = "Product not found", body = RpcResponse),
        (status = 409, description = "Requested quantity not available", body = RpcResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = RpcResponse)
    )
)]
pub async fn buy_item_handler(
    State(state): State<AppState>,
    request: Result<Json<BuyItemRequest>, JsonRejection>,
) -> Response {
    let request = match parse_body(request, "{\"product_id\", \"quantity\"}") {
        Ok(r) => r,
        Err(resp) => return resp,
    };
    let buyer = request.buyer_address.map(BuyerId::new);
    match state
        .service
        .buy_item(buyer.as_ref(), request.product_id, request.quantity)
    {
        Ok(purchase) => success(
            "Bought product successfully",
            Some(serde_json::json!({
                "product_id": purchase.product_id,
                "quantity": purchase.quantity,
                "remaining": purchase.remaining,
            })),
        ),
        Err(e) => market_error_response(e),
    }
}

#[utoipa::path(
    post,
    path = "/rpc/display-wishlist",
    request_body = DisplayWishlistRequest,
    responses(
        (status = 200, description = "Wishlisted listings (data.items, data.output)", body = RpcResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = RpcResponse)
    )
)]
pub async fn display_wishlist_handler(
    State(state): State<AppState>,
    request: Result<Json<DisplayWishlistRequest>, JsonRejection>,
) -> Response {
    let request = match parse_body(request, "{\"buyer_address\"}") {
        Ok(r) => r,
        Err(resp) => return resp,
    };
    let items = state.service.display_wishlist(&request.buyer_id());
    success(
        format!("{} item(s) in wishlist", items.len()),
        Some(listing_data(&items)),
    )
}

#[utoipa::path(
    post,
    path = "/rpc/get-item",
    request_body = GetItemRequest,
    responses(
        (status = 200, description = "The listing (data.item)", body = RpcResponse),
        (status = 404, description = "Product not found", body = RpcResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = RpcResponse)
    )
)]
pub async fn get_item_handler(
    State(state): State<AppState>,
    request: Result<Json<GetItemRequest>, JsonRejection>,
) -> Response {
    let request = match parse_body(request, "{\"product_id\"}") {
        Ok(r) => r,
        Err(resp) => return resp,
    };
    match state.service.get_item(request.product_id) {
        Ok(item) => success(
            item.to_string(),
            Some(serde_json::json!({ "item": item })),
        ),
        Err(e) => market_error_response(e),
    }
}
