//! Client side of the RPC contract, used by the command-line front end and
//! the integration tests.

use crate::domain::market::{Category, ProductId};
use crate::infra::notifier::{NotificationRequest, NotificationResponse};
use crate::transport::http::types::{
    BuyItemRequest, DeleteItemRequest, DisplayWishlistRequest, GetItemRequest, RateItemRequest,
    RpcResponse, SearchItemRequest, SellItemRequest, SellerCredentials, UpdateItemRequest,
    WishlistRequest,
};
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;

pub struct MarketClient {
    base_url: String,
    http: reqwest::Client,
}

impl MarketClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Registry failures come back as a `FAIL` body with a 4xx status, so the
    /// body is decoded regardless of the HTTP status.
    async fn call<B: Serialize>(&self, route: &str, body: &B) -> anyhow::Result<RpcResponse> {
        let resp = self
            .http
            .post(format!("{}/rpc/{}", self.base_url, route))
            .json(body)
            .send()
            .await?;
        Ok(resp.json::<RpcResponse>().await?)
    }

    pub async fn health(&self) -> anyhow::Result<RpcResponse> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.json::<RpcResponse>().await?)
    }

    pub async fn register_seller(&self, seller: &SellerCredentials) -> anyhow::Result<RpcResponse> {
        self.call("register-seller", seller).await
    }

    pub async fn sell_item(
        &self,
        seller: &SellerCredentials,
        name: &str,
        category: Category,
        price: f64,
        quantity: u32,
        description: &str,
    ) -> anyhow::Result<RpcResponse> {
        let body = SellItemRequest {
            seller: seller.clone(),
            name: name.to_string(),
            category,
            price,
            quantity,
            description: description.to_string(),
        };
        self.call("sell-item", &body).await
    }

    pub async fn update_item(
        &self,
        seller: &SellerCredentials,
        product_id: ProductId,
        new_price: f64,
        new_quantity: u32,
    ) -> anyhow::Result<RpcResponse> {
        let body = UpdateItemRequest {
            seller: seller.clone(),
            product_id,
            new_price,
            new_quantity,
        };
        self.call("update-item", &body).await
    }

    pub async fn delete_item(
        &self,
        seller: &SellerCredentials,
        product_id: ProductId,
    ) -> anyhow::Result<RpcResponse> {
        let body = DeleteItemRequest {
            seller: seller.clone(),
            product_id,
        };
        self.call("delete-item", &body).await
    }

    pub async fn display_seller_items(
        &self,
        seller: &SellerCredentials,
    ) -> anyhow::Result<RpcResponse> {
        self.call("display-seller-items", seller).await
    }

    pub async fn search_item(&self, name: &str, category: &str) -> anyhow::Result<RpcResponse> {
        let body = SearchItemRequest {
            name: name.to_string(),
            category: category.to_string(),
        };
        self.call("search-item", &body).await
    }

    pub async fn rate_item(
        &self,
        buyer_address: &str,
        product_id: ProductId,
        rating: i32,
    ) -> anyhow::Result<RpcResponse> {
        let body = RateItemRequest {
            buyer_address: buyer_address.to_string(),
            product_id,
            rating,
        };
        self.call("rate-item", &body).await
    }

    pub async fn wishlist_item(
        &self,
        buyer_address: &str,
        product_id: ProductId,
    ) -> anyhow::Result<RpcResponse> {
        let body = WishlistRequest {
            buyer_address: buyer_address.to_string(),
            product_id,
        };
        self.call("wishlist-item", &body).await
    }

    pub async fn buy_item(
        &self,
        buyer_address: Option<&str>,
        product_id: ProductId,
        quantity: u32,
    ) -> anyhow::Result<RpcResponse> {
        let body = BuyItemRequest {
            product_id,
            quantity,
            buyer_address: buyer_address.map(str::to_string),
        };
        self.call("buy-item", &body).await
    }

    pub async fn display_wishlist(&self, buyer_address: &str) -> anyhow::Result<RpcResponse> {
        let body = DisplayWishlistRequest {
            buyer_address: buyer_address.to_string(),
        };
        self.call("display-wishlist", &body).await
    }

    pub async fn get_item(&self, product_id: ProductId) -> anyhow::Result<RpcResponse> {
        self.call("get-item", &GetItemRequest { product_id }).await
    }
}

/// Receiving end of the notifier: `POST /notify` forwards each message into
/// the channel.
pub fn notification_router(sink: UnboundedSender<String>) -> Router {
    Router::new()
        .route("/notify", post(receive_notification))
        .with_state(sink)
}

async fn receive_notification(
    State(sink): State<UnboundedSender<String>>,
    Json(request): Json<NotificationRequest>,
) -> Json<NotificationResponse> {
    let _ = sink.send(request.message);
    Json(NotificationResponse {
        response: "Received a notification".to_string(),
    })
}
