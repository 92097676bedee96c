use crate::transport::http::handlers::common::{
    listing_data, market_error_response, parse_body, success,
};
use crate::transport::http::types::{
    AppState, DeleteItemRequest, RpcResponse, SellItemRequest, SellerCredentials,
    UpdateItemRequest,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;

#[utoipa::path(
    post,
    path = "/rpc/register-seller",
    request_body = SellerCredentials,
    responses(
        (status = 200, description = "Seller registered", body = RpcResponse),
        (status = 409, description = "Seller already registered", body = RpcResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = RpcResponse)
    )
)]
pub async fn register_seller_handler(
    State(state): State<AppState>,
    request: Result<Json<SellerCredentials>, JsonRejection>,
) -> Response {
    let request = match parse_body(request, "{\"address\", \"instance_id\"}") {
        Ok(r) => r,
        Err(resp) => return resp,
    };
    match state.service.register_seller(request.seller_id()) {
        Ok(()) => success("Registered seller successfully", None),
        Err(e) => market_error_response(e),
    }
}

#[utoipa::path(
    post,
    path = "/rpc/sell-item",
    request_body = SellItemRequest,
    responses(
        (status = 200, description = "Item listed; data.product_id holds the new id", body = RpcResponse),
        (status = 400, description = "Invalid price", body = RpcResponse),
        (status = 404, description = "Seller not registered", body = RpcResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = RpcResponse)
    )
)]
pub async fn sell_item_handler(
    State(state): State<AppState>,
    request: Result<Json<SellItemRequest>, JsonRejection>,
) -> Response {
    let request = match parse_body(
        request,
        "{\"address\", \"instance_id\", \"name\", \"category\", \"price\", \"quantity\", \"description\"}",
    ) {
        Ok(r) => r,
        Err(resp) => return resp,
    };
    match state
        .service
        .sell_item(&request.seller.seller_id(), request.listing())
    {
        Ok(id) => success(
            "Item Listed Successfully",
            Some(serde_json::json!({ "product_id": id })),
        ),
        Err(e) => market_error_response(e),
    }
}

#[utoipa::path(
    post,
    path = "/rpc/update-item",
    request_body = UpdateItemRequest,
    responses(
        (status = 200, description = "Item updated", body = RpcResponse),
        (status = 400, description = "Invalid price", body = RpcResponse),
        (status = 403, description = "Product owned by another seller", body = RpcResponse),
        (status = 404, description = "Product or seller not found", body = RpcResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = RpcResponse)
    )
)]
pub async fn update_item_handler(
    State(state): State<AppState>,
    request: Result<Json<UpdateItemRequest>, JsonRejection>,
) -> Response {
    let request = match parse_body(
        request,
        "{\"address\", \"instance_id\", \"product_id\", \"new_price\", \"new_quantity\"}",
    ) {
        Ok(r) => r,
        Err(resp) => return resp,
    };
    match state.service.update_item(
        &request.seller.seller_id(),
        request.product_id,
        request.new_price,
        request.new_quantity,
    ) {
        Ok(update) => success(
            "Updated product",
            Some(serde_json::json!({
                "product_id": update.product_id,
                "price": update.price,
                "quantity": update.quantity,
                "notified_buyers": update.watchers.len(),
            })),
        ),
        Err(e) => market_error_response(e),
    }
}

#[utoipa::path(
    post,
    path = "/rpc/delete-item",
    request_body = DeleteItemRequest,
    responses(
        (status = 200, description = "Item deleted", body = RpcResponse),
        (status = 403, description = "Product owned by another seller", body = RpcResponse),
        (status = 404, description = "Product or seller not found", body = RpcResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = RpcResponse)
    )
)]
pub async fn delete_item_handler(
    State(state): State<AppState>,
    request: Result<Json<DeleteItemRequest>, JsonRejection>,
) -> Response {
    let request = match parse_body(request, "{\"address\", \"instance_id\", \"product_id\"}") {
        Ok(r) => r,
        Err(resp) => return resp,
    };
    match state
        .service
        .delete_item(&request.seller.seller_id(), request.product_id)
    {
        Ok(()) => success("Deleted product successfully", None),
        Err(e) => market_error_response(e),
    }
}

#[utoipa::path(
    post,
    path = "/rpc/display-seller-items",
    request_body = SellerCredentials,
    responses(
        (status = 200, description = "Seller's listings (data.items, data.output)", body = RpcResponse),
        (status = 404, description = "Seller not found", body = RpcResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = RpcResponse)
    )
)]
pub async fn display_seller_items_handler(
    State(state): State<AppState>,
    request: Result<Json<SellerCredentials>, JsonRejection>,
) -> Response {
    let request = match parse_body(request, "{\"address\", \"instance_id\"}") {
        Ok(r) => r,
        Err(resp) => return resp,
    };
    match state.service.display_seller_items(&request.seller_id()) {
        Ok(items) => success(
            format!("{} item(s)", items.len()),
            Some(listing_data(&items)),
        ),
        Err(e) => market_error_response(e),
    }
}
