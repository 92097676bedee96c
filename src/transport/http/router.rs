use crate::domain::market::{Category, Product, ProductId};
use crate::transport::http::handlers::{buyer, health, seller};
use crate::transport::http::types::{
    BuyItemRequest, DeleteItemRequest, DisplayWishlistRequest, GetItemRequest, RateItemRequest,
    RpcResponse, RpcStatus, SearchItemRequest, SellItemRequest, SellerCredentials,
    UpdateItemRequest, WishlistRequest,
};
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        seller::register_seller_handler,
        seller::sell_item_handler,
        seller::update_item_handler,
        seller::delete_item_handler,
        seller::display_seller_items_handler,
        buyer::search_item_handler,
        buyer::rate_item_handler,
        buyer::wishlist_item_handler,
        buyer::buy_item_handler,
        buyer::display_wishlist_handler,
        buyer::get_item_handler
    ),
    components(schemas(
        RpcResponse,
        RpcStatus,
        SellerCredentials,
        SellItemRequest,
        UpdateItemRequest,
        DeleteItemRequest,
        SearchItemRequest,
        RateItemRequest,
        WishlistRequest,
        BuyItemRequest,
        DisplayWishlistRequest,
        GetItemRequest,
        Category,
        Product,
        ProductId
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/rpc/register-seller", post(seller::register_seller_handler))
        .route("/rpc/sell-item", post(seller::sell_item_handler))
        .route("/rpc/update-item", post(seller::update_item_handler))
        .route("/rpc/delete-item", post(seller::delete_item_handler))
        .route(
            "/rpc/display-seller-items",
            post(seller::display_seller_items_handler),
        )
        .route("/rpc/search-item", post(buyer::search_item_handler))
        .route("/rpc/rate-item", post(buyer::rate_item_handler))
        .route("/rpc/wishlist-item", post(buyer::wishlist_item_handler))
        .route("/rpc/buy-item", post(buyer::buy_item_handler))
        .route("/rpc/display-wishlist", post(buyer::display_wishlist_handler))
        .route("/rpc/get-item", post(buyer::get_item_handler))
        .with_state(app_state)
}
