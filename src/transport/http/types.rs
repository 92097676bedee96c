use crate::app::marketplace_service::MarketplaceService;
use crate::domain::market::{BuyerId, Category, NewListing, ProductId, SellerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<MarketplaceService>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(service: Arc<MarketplaceService>) -> Self {
        Self {
            service,
            started_at: Utc::now(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RpcStatus {
    Success,
    Fail,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct RpcResponse {
    pub status: RpcStatus,
    pub message: String,
    /// Machine-readable failure code (e.g. `PRODUCT_NOT_FOUND`); absent on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
}

impl RpcResponse {
    pub fn is_success(&self) -> bool {
        self.status == RpcStatus::Success
    }
}

/// Seller credentials carried by every seller-side request.
#[derive(Deserialize, Serialize, Debug, ToSchema, Clone)]
pub struct SellerCredentials {
    #[serde(alias = "ip_port")]
    pub address: String,
    #[serde(alias = "uuid")]
    pub instance_id: String,
}

impl SellerCredentials {
    pub fn seller_id(&self) -> SellerId {
        SellerId::new(self.address.clone(), self.instance_id.clone())
    }
}

#[derive(Deserialize, Serialize, Debug, ToSchema, Clone)]
pub struct SellItemRequest {
    #[serde(flatten)]
    pub seller: SellerCredentials,
    pub name: String,
    pub category: Category,
    pub price: f64,
    pub quantity: u32,
    #[serde(default)]
    pub description: String,
}

impl SellItemRequest {
    pub fn listing(&self) -> NewListing {
        NewListing {
            name: self.name.clone(),
            category: self.category,
            price: self.price,
            quantity: self.quantity,
            description: self.description.clone(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, ToSchema, Clone)]
pub struct UpdateItemRequest {
    #[serde(flatten)]
    pub seller: SellerCredentials,
    #[serde(alias = "_id")]
    #[schema(value_type = u64)]
    pub product_id: ProductId,
    pub new_price: f64,
    pub new_quantity: u32,
}

#[derive(Deserialize, Serialize, Debug, ToSchema, Clone)]
pub struct DeleteItemRequest {
    #[serde(flatten)]
    pub seller: SellerCredentials,
    #[serde(alias = "_id")]
    #[schema(value_type = u64)]
    pub product_id: ProductId,
}

#[derive(Deserialize, Serialize, Debug, ToSchema, Clone)]
pub struct SearchItemRequest {
    /// Exact product name, or `*` for every product.
    pub name: String,
    /// `Electronics`, `Fashion`, `Others`, or `all` (exact tokens). Ignored
    /// when `name` is `*`; any other token matches nothing.
    pub category: String,
}

#[derive(Deserialize, Serialize, Debug, ToSchema, Clone)]
pub struct RateItemRequest {
    #[serde(alias = "buyer_ip_port")]
    pub buyer_address: String,
    #[serde(alias = "_id")]
    #[schema(value_type = u64)]
    pub product_id: ProductId,
    pub rating: i32,
}

#[derive(Deserialize, Serialize, Debug, ToSchema, Clone)]
pub struct WishlistRequest {
    #[serde(alias = "buyer_ip_port")]
    pub buyer_address: String,
    #[serde(alias = "_id")]
    #[schema(value_type = u64)]
    pub product_id: ProductId,
}

#[derive(Deserialize, Serialize, Debug, ToSchema, Clone)]
pub struct BuyItemRequest {
    #[serde(alias = "_id")]
    #[schema(value_type = u64)]
    pub product_id: ProductId,
    pub quantity: u32,
    /// Optional; only used for logging and the seller notification.
    #[serde(default, alias = "ip_port")]
    pub buyer_address: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, ToSchema, Clone)]
pub struct DisplayWishlistRequest {
    #[serde(alias = "buyer_ip_port")]
    pub buyer_address: String,
}

impl DisplayWishlistRequest {
    pub fn buyer_id(&self) -> BuyerId {
        BuyerId::new(self.buyer_address.clone())
    }
}

#[derive(Deserialize, Serialize, Debug, ToSchema, Clone)]
pub struct GetItemRequest {
    #[serde(alias = "_id")]
    #[schema(value_type = u64)]
    pub product_id: ProductId,
}
